//! # Folio Server
//!
//! Portfolio pages, the blog and its JSON API on Actix-web.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;


use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::init_telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_telemetry(&config);

    tracing::info!("Starting Folio server on {}:{}", config.host, config.port);

    let state = AppState::new(&config).await.map_err(std::io::Error::other)?;

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
