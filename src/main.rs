//! Backup Relay - HTTP facade for ZIP backup archives stored in S3
//!
//! This service accepts ZIP uploads over HTTP, forwards them to an S3
//! bucket, lists the stored archives, and streams a named archive back
//! to the caller.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use backup_relay::config::Config;
use backup_relay::server::Server;
use backup_relay::{metrics, storage, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment and optional config file
    let config = Config::from_env()?;

    // Initialize tracing with JSON output for structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Initialize Prometheus metrics
    metrics::init_metrics();

    info!("Starting backup relay");
    info!(bucket = %config.storage.bucket, region = %config.storage.region, "Configuration loaded");

    // Build the S3 client once; handlers share it through AppState
    let storage = storage::create_backend(&config).await;
    info!("Storage backend initialized");

    let state = AppState {
        storage,
        config: Arc::new(config),
    };
    let server = Server::new(state.clone());

    // Handle graceful shutdown
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal");
    };

    info!("Server starting on {}", state.config.server.bind_address);
    if let Err(e) = server.start(shutdown_signal).await {
        error!(error = %e, "Server error");
        return Err(e);
    }

    info!("Server shutdown complete");
    Ok(())
}
