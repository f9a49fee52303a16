use actix_web::{HttpResponse, ResponseError};
use colored::Colorize;
use serde_json::json;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum CoffeeError {
    // 400s
    BadRequest(String),
    // 500
    StoreError(String),
    StoreContention(String),
    TemplateError(String),
    LocaleError(String),
    ConfigError(String),
    InternalServerError(String),
}

impl fmt::Display for CoffeeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoffeeError::BadRequest(e) => write!(f, "Bad Request: {}", e),
            CoffeeError::StoreError(e) => write!(f, "Store Error: \n{}", e),
            CoffeeError::StoreContention(id) => {
                write!(f, "Store Contention: increment of counter {} kept colliding", id)
            }
            CoffeeError::TemplateError(e) => write!(f, "Template Error: {}", e),
            CoffeeError::LocaleError(e) => write!(f, "Locale Error: {}", e),
            CoffeeError::ConfigError(e) => write!(f, "Config Error: {}", e),
            CoffeeError::InternalServerError(e) => write!(f, "InternalServerError: \n{}", e),
        }
    }
}

impl Error for CoffeeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CoffeeError::BadRequest(_) => None,
            CoffeeError::StoreError(_) => None,
            CoffeeError::StoreContention(_) => None,
            CoffeeError::TemplateError(_) => None,
            CoffeeError::LocaleError(_) => None,
            CoffeeError::ConfigError(_) => None,
            CoffeeError::InternalServerError(_) => None,
        }
    }
}

impl ResponseError for CoffeeError {
    fn error_response(&self) -> HttpResponse {
        match self {
            CoffeeError::BadRequest(e) => HttpResponse::BadRequest().json(json!({
                "status": 400,
                "message": e
            })),
            _ => {
                log::error!("{}", self.to_string().red());

                // raw backend details stay in the log
                HttpResponse::InternalServerError().json(json!({
                    "status": 500,
                    "message": "Something went wrong"
                }))
            }
        }
    }
}

impl From<handlebars::RenderError> for CoffeeError {
    fn from(e: handlebars::RenderError) -> Self {
        CoffeeError::TemplateError(e.to_string())
    }
}

impl From<handlebars::TemplateError> for CoffeeError {
    fn from(e: handlebars::TemplateError) -> Self {
        CoffeeError::TemplateError(e.to_string())
    }
}

impl From<toml::de::Error> for CoffeeError {
    fn from(e: toml::de::Error) -> Self {
        CoffeeError::ConfigError(e.to_string())
    }
}
