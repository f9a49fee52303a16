use crate::api::types::SpeechResponse;
use crate::errors::CoffeeError;
use crate::intents::{HandlerInput, Intent, IntentHandler};
use crate::resources::localizer::{COFFEE_RECORDED, STORE_ERROR_MESSAGE, STORE_ERROR_REPROMPT};
use async_trait::async_trait;
use serde_json::json;

/// Launching the skill counts as making a coffee.
pub struct MakeCoffeeHandler;

#[async_trait]
impl IntentHandler for MakeCoffeeHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        matches!(input.intent, Intent::Launch | Intent::MakeCoffee)
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<SpeechResponse, CoffeeError> {
        // a store failure must not end the session
        let counter = match input.store.increment_count(input.user_id()).await {
            Ok(counter) => counter,
            Err(e) => {
                log::warn!("Coffee of {} not recorded: {}", input.user_id(), e);

                let apology = input.say(STORE_ERROR_MESSAGE)?;
                let reprompt = input.say(STORE_ERROR_REPROMPT)?;

                return Ok(SpeechResponse::speak(format!("{} {}", apology, reprompt)).reprompt(reprompt));
            }
        };

        let recorded = input.say_with(COFFEE_RECORDED, &json!({ "count": counter.count }))?;
        let suffix = input.cleaning_suffix(&counter)?;

        Ok(SpeechResponse::speak(format!("{} {}", recorded, suffix)).end_session())
    }
}
