mod api;
mod app;
mod constants;
mod errors;
mod intents;
mod models;
mod resources;
mod services;
mod utils;

#[cfg(test)]
mod test_utils;

use crate::utils::logger::{log_fatal, log_success};
use actix_web::middleware::Logger;
use actix_web::{web, App as ActixWebApp, HttpServer};
use app::App;

#[tokio::main]
async fn main() {
    App::init_logger();

    let app = App::new().await.unwrap_or_else(|e| {
        log_fatal(format!("Unable to start coffeecount: {}", e));
        std::process::exit(1);
    });

    let (host, port) = app.bind_address();
    let json_config = app.json_config();
    let app_web_data = web::Data::new(app);

    log_success(format!("Listening on {}:{}", host, port));

    HttpServer::new(move || {
        ActixWebApp::new()
            .wrap(Logger::new("%a %r %s %b %T"))
            .app_data(app_web_data.clone())
            .app_data(json_config.clone())
            .configure(api::configure)
    })
    .bind((host.as_str(), port))
    .unwrap_or_else(|e| panic!("Could not bind to port {}.\n{}", port, e))
    .run()
    .await
    .unwrap_or_else(|e| panic!("Could not run server to port {}.\n{}", port, e));
}
