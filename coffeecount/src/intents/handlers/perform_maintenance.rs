use crate::api::types::SpeechResponse;
use crate::errors::CoffeeError;
use crate::intents::{HandlerInput, Intent, IntentHandler};
use crate::resources::localizer::MAINTENANCE_RECORDED;
use async_trait::async_trait;
use serde_json::json;

pub struct PerformMaintenanceHandler;

#[async_trait]
impl IntentHandler for PerformMaintenanceHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.intent == Intent::PerformMaintenance
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<SpeechResponse, CoffeeError> {
        let count = input.store.get_count(input.user_id()).await?;
        input.store.record_maintenance(input.user_id(), count).await?;

        let speech = input.say_with(MAINTENANCE_RECORDED, &json!({ "count": count }))?;

        Ok(SpeechResponse::speak(speech).end_session())
    }
}
