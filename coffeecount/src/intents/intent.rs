use crate::api::types::{RequestType, SkillRequest};
use std::str::FromStr;

/// Intent names as resolved by the voice platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::EnumString)]
pub enum IntentName {
    #[strum(serialize = "MakeCoffeeIntent")]
    MakeCoffee,
    #[strum(serialize = "CountCoffeeIntent")]
    CountCoffee,
    #[strum(serialize = "PerformMaintenanceIntent")]
    PerformMaintenance,
    #[strum(serialize = "AMAZON.HelpIntent")]
    Help,
    #[strum(serialize = "AMAZON.FallbackIntent")]
    Fallback,
    #[strum(serialize = "AMAZON.CancelIntent")]
    Cancel,
    #[strum(serialize = "AMAZON.StopIntent")]
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Launch,
    MakeCoffee,
    CountCoffee,
    PerformMaintenance,
    Help,
    Fallback,
    CancelOrStop,
    SessionEnded { reason: Option<String> },
    Unrecognized,
}

impl Intent {
    pub fn resolve(request: &SkillRequest) -> Self {
        match request.request_type {
            RequestType::LaunchRequest => Intent::Launch,
            RequestType::SessionEndedRequest => Intent::SessionEnded {
                reason: request.reason.clone(),
            },
            RequestType::IntentRequest => {
                let name = request.intent_name().and_then(|name| IntentName::from_str(name).ok());

                match name {
                    Some(IntentName::MakeCoffee) => Intent::MakeCoffee,
                    Some(IntentName::CountCoffee) => Intent::CountCoffee,
                    Some(IntentName::PerformMaintenance) => Intent::PerformMaintenance,
                    Some(IntentName::Help) => Intent::Help,
                    Some(IntentName::Fallback) => Intent::Fallback,
                    Some(IntentName::Cancel) | Some(IntentName::Stop) => Intent::CancelOrStop,
                    None => Intent::Unrecognized,
                }
            }
            RequestType::Unknown => Intent::Unrecognized,
        }
    }
}
