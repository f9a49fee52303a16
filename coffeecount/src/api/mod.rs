pub mod types;

mod skill_api;

use actix_web::web;

pub use skill_api::*;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/skill").service(handle_skill_request))
        .service(web::scope("/health").service(health));
}
