use crate::constants::DEFAULT_LOCALE;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    LaunchRequest,
    IntentRequest,
    SessionEndedRequest,
    #[serde(other)]
    Unknown,
}

/// Voice-platform request after NLU, reduced to the fields the skill reads.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequest {
    pub request_type: RequestType,

    #[serde(default)]
    pub intent: Option<IntentData>,

    pub session: Session,

    #[serde(default = "default_locale")]
    pub locale: String,

    /// Only sent with `SessionEndedRequest`.
    #[serde(default)]
    pub reason: Option<String>,

    #[serde(default)]
    pub error: Option<SessionError>,
}

/// Slot values are not read, so they are left out of the parsed shape.
#[derive(Deserialize, Debug, Clone)]
pub struct IntentData {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Session {
    pub user: User,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SessionError {
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl SkillRequest {
    pub fn user_id(&self) -> &str {
        &self.session.user.user_id
    }

    pub fn intent_name(&self) -> Option<&str> {
        self.intent.as_ref().map(|intent| intent.name.as_str())
    }
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}
