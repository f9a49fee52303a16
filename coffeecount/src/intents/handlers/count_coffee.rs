use crate::api::types::SpeechResponse;
use crate::errors::CoffeeError;
use crate::intents::{HandlerInput, Intent, IntentHandler};
use crate::resources::localizer::COFFEE_COUNT;
use async_trait::async_trait;
use serde_json::json;

pub struct CountCoffeeHandler;

#[async_trait]
impl IntentHandler for CountCoffeeHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.intent == Intent::CountCoffee
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<SpeechResponse, CoffeeError> {
        let counter = input.store.get_counter_details(input.user_id()).await?;

        let count = input.say_with(COFFEE_COUNT, &json!({ "count": counter.count }))?;
        let suffix = input.cleaning_suffix(&counter)?;

        Ok(SpeechResponse::speak(format!("{} {}", count, suffix)).end_session())
    }
}
