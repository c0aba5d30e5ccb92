//! Main entry point for the congtac server.
//!
//! Loads configuration, initializes logging, connects to the database, and
//! runs the HTTP server until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use congtac_server::{
    model::{AppState, Configuration},
    startup::{self, GracefulShutdown, LoggingConfig},
};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize configuration and logging
    let configuration = Configuration::new();

    let logging_config =
        LoggingConfig::from_config(configuration.logs_path(), configuration.logs_level());
    let _logging_guard = startup::init_logging(&logging_config)?;

    info!(
        version = congtac_server::model::constants::CONGTAC_VERSION,
        "Starting congtac server"
    );

    // Connect to the relational store
    let database_connection = configuration.database_connection().await?;
    info!("Database connection established");

    let server_address = configuration.server_address();
    let server_port = configuration.server_port();
    let context_path = configuration.server_context_path();

    let app_state = Arc::new(AppState::new(configuration, database_connection));

    // Initialize graceful shutdown handler
    let shutdown_signal = startup::wait_for_shutdown_signal().await;
    let graceful_shutdown = GracefulShutdown::new(shutdown_signal, Duration::from_secs(30));

    info!(
        "Starting congtac API server on {}:{}{}",
        server_address, server_port, context_path
    );
    let server = startup::api_server(
        app_state.clone(),
        context_path,
        server_address,
        server_port,
    )?;

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("API server error: {}", e);
            }
        }
        _ = graceful_shutdown.wait_for_shutdown() => {
            info!("API server shutting down gracefully");
        }
    }

    info!("congtac server shutdown complete");
    Ok(())
}
