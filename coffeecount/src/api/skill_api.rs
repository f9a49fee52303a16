use crate::api::types::{Response, SkillRequest};
use crate::app::App;
use crate::errors::CoffeeError;
use crate::intents::HandlerInput;
use actix_web::{get, post, web, HttpResponse};

#[post("")]
pub async fn handle_skill_request(app: web::Data<App>, request: web::Json<SkillRequest>) -> Response {
    if request.user_id().trim().is_empty() {
        return Err(CoffeeError::BadRequest("session.user.userId must not be empty".to_string()));
    }

    let input = HandlerInput::new(&request, &app.counter_store, &app.localizer);
    let response = app.dispatcher.dispatch(&input).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}
