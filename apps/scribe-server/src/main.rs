//! # Scribe Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

#[cfg(test)]
mod test_support;

use config::AppConfig;
use middleware::method_override::MethodOverride;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env()?;

    tracing::info!(
        "Starting Scribe server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await?;

    HttpServer::new(move || {
        App::new()
            .wrap(MethodOverride)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
