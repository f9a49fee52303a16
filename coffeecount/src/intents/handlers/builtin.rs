//! Handlers that answer from the locale files alone.

use crate::api::types::SpeechResponse;
use crate::errors::CoffeeError;
use crate::intents::{HandlerInput, Intent, IntentHandler};
use crate::resources::localizer::{
    FALLBACK_MESSAGE, FALLBACK_REPROMPT, HELP_MESSAGE, HELP_REPROMPT, STOP_MESSAGE, WELCOME_MESSAGE, WELCOME_REPROMPT,
};
use async_trait::async_trait;

pub struct HelpHandler;

#[async_trait]
impl IntentHandler for HelpHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.intent == Intent::Help
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<SpeechResponse, CoffeeError> {
        Ok(SpeechResponse::speak(input.say(HELP_MESSAGE)?).reprompt(input.say(HELP_REPROMPT)?))
    }
}

pub struct FallbackHandler;

#[async_trait]
impl IntentHandler for FallbackHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.intent == Intent::Fallback
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<SpeechResponse, CoffeeError> {
        Ok(SpeechResponse::speak(input.say(FALLBACK_MESSAGE)?).reprompt(input.say(FALLBACK_REPROMPT)?))
    }
}

pub struct CancelAndStopHandler;

#[async_trait]
impl IntentHandler for CancelAndStopHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.intent == Intent::CancelOrStop
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<SpeechResponse, CoffeeError> {
        Ok(SpeechResponse::speak(input.say(STOP_MESSAGE)?).end_session())
    }
}

pub struct SessionEndedHandler;

#[async_trait]
impl IntentHandler for SessionEndedHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        matches!(input.intent, Intent::SessionEnded { .. })
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<SpeechResponse, CoffeeError> {
        if let Intent::SessionEnded { reason } = &input.intent {
            log::info!(
                "Session of {} ended: {}",
                input.user_id(),
                reason.as_deref().unwrap_or("unknown reason")
            );
        }

        if let Some(error) = &input.request.error {
            log::warn!(
                "Session ended with platform error {}: {}",
                error.error_type.as_deref().unwrap_or("UNKNOWN"),
                error.message.as_deref().unwrap_or_default()
            );
        }

        Ok(SpeechResponse::empty())
    }
}

/// Anything not claimed above gets the welcome message.
pub struct WelcomeHandler;

#[async_trait]
impl IntentHandler for WelcomeHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.intent == Intent::Unrecognized
    }

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<SpeechResponse, CoffeeError> {
        if let Some(name) = input.request.intent_name() {
            log::debug!("Unrecognized intent {}", name);
        }

        Ok(SpeechResponse::speak(input.say(WELCOME_MESSAGE)?).reprompt(input.say(WELCOME_REPROMPT)?))
    }
}
