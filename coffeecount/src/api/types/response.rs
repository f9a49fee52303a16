use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::errors::CoffeeError;

pub type Response = Result<HttpResponse, CoffeeError>;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResponse {
    pub speech_text: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reprompt_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub should_end_session: Option<bool>,
}

impl SpeechResponse {
    pub fn speak(speech_text: impl Into<String>) -> Self {
        Self {
            speech_text: speech_text.into(),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Keeps the session open waiting for an answer.
    pub fn reprompt(mut self, reprompt_text: impl Into<String>) -> Self {
        self.reprompt_text = Some(reprompt_text.into());
        self.should_end_session = Some(false);

        self
    }

    pub fn end_session(mut self) -> Self {
        self.should_end_session = Some(true);

        self
    }
}
