use crate::api::types::{SkillRequest, SpeechResponse};
use crate::errors::CoffeeError;
use crate::intents::Intent;
use crate::models::{CleaningStatus, UserCounter};
use crate::resources::localizer::{Localizer, CLEAN_NOW, COFFEES_LEFT};
use crate::services::CounterStore;
use async_trait::async_trait;
use serde_json::json;

/// Everything a handler needs for one request.
pub struct HandlerInput<'a> {
    pub request: &'a SkillRequest,
    pub intent: Intent,
    pub store: &'a CounterStore,
    pub localizer: &'a Localizer,
}

impl<'a> HandlerInput<'a> {
    pub fn new(request: &'a SkillRequest, store: &'a CounterStore, localizer: &'a Localizer) -> Self {
        Self {
            request,
            intent: Intent::resolve(request),
            store,
            localizer,
        }
    }

    pub fn user_id(&self) -> &str {
        self.request.user_id()
    }

    pub fn say(&self, key: &str) -> Result<String, CoffeeError> {
        self.say_with(key, &serde_json::Value::Null)
    }

    pub fn say_with(&self, key: &str, args: &serde_json::Value) -> Result<String, CoffeeError> {
        self.localizer.translate(&self.request.locale, key, args)
    }

    /// Sentence telling how far the machine is from its next cleaning.
    pub fn cleaning_suffix(&self, counter: &UserCounter) -> Result<String, CoffeeError> {
        match counter.cleaning_status() {
            CleaningStatus::Due => self.say(CLEAN_NOW),
            CleaningStatus::CoffeesLeft(left) => self.say_with(COFFEES_LEFT, &json!({ "left": left })),
        }
    }
}

#[async_trait]
pub trait IntentHandler: Send + Sync {
    /// Pure check over the request shape.
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool;

    async fn handle(&self, input: &HandlerInput<'_>) -> Result<SpeechResponse, CoffeeError>;
}
