mod dispatcher;
mod handler;
mod intent;

pub mod handlers;

pub use dispatcher::Dispatcher;
pub use handler::{HandlerInput, IntentHandler};
pub use intent::Intent;
