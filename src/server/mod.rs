//! HTTP server implementation
//!
//! Sets up the Axum HTTP server with:
//! - Backup relay routes
//! - Middleware (request tracing, timeout)
//! - Graceful shutdown

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::routes;
use crate::AppState;

/// HTTP server for the backup relay
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a new server instance
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Build the Axum router with all middleware
    fn build_router(&self) -> Router {
        routes::create_router(self.state.clone()).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(std::time::Duration::from_secs(
                    self.state.config.server.timeout_secs,
                )))
                .into_inner(),
        )
    }

    /// Start the server and run until shutdown signal
    pub async fn start<F>(&self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.build_router();
        let bind_address = self.state.config.server.bind_address;

        let listener = tokio::net::TcpListener::bind(bind_address).await?;
        info!(address = %bind_address, "Server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
