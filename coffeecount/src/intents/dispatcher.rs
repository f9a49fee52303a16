use crate::api::types::SpeechResponse;
use crate::errors::CoffeeError;
use crate::intents::handlers::{
    CancelAndStopHandler, CountCoffeeHandler, FallbackHandler, HelpHandler, MakeCoffeeHandler,
    PerformMaintenanceHandler, SessionEndedHandler, WelcomeHandler,
};
use crate::intents::{HandlerInput, IntentHandler};
use crate::resources::localizer::ERROR_MESSAGE;

/// Routes a request to the first handler, in priority order, that claims it.
pub struct Dispatcher {
    handlers: Vec<Box<dyn IntentHandler>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(vec![
            Box::new(MakeCoffeeHandler),
            Box::new(CountCoffeeHandler),
            Box::new(PerformMaintenanceHandler),
            Box::new(HelpHandler),
            Box::new(CancelAndStopHandler),
            Box::new(FallbackHandler),
            Box::new(SessionEndedHandler),
            Box::new(WelcomeHandler),
        ])
    }
}

impl Dispatcher {
    pub fn new(handlers: Vec<Box<dyn IntentHandler>>) -> Self {
        Self { handlers }
    }

    /// Handler failures are turned into the localized error speech; only a failure to
    /// produce that speech reaches the caller.
    pub async fn dispatch(&self, input: &HandlerInput<'_>) -> Result<SpeechResponse, CoffeeError> {
        let res = match self.handlers.iter().find(|handler| handler.can_handle(input)) {
            Some(handler) => handler.handle(input).await,
            None => Err(CoffeeError::InternalServerError(format!(
                "No handler claimed {:?}",
                input.intent
            ))),
        };

        match res {
            Ok(response) => Ok(response),
            Err(e) => ErrorHandler.handle(input, &e),
        }
    }
}

pub struct ErrorHandler;

impl ErrorHandler {
    pub fn handle(&self, input: &HandlerInput<'_>, error: &CoffeeError) -> Result<SpeechResponse, CoffeeError> {
        log::error!("Error handling {:?} for {}: {}", input.intent, input.user_id(), error);

        let message = input.say(ERROR_MESSAGE)?;

        Ok(SpeechResponse::speak(message.clone()).reprompt(message))
    }
}
