//! HTTP routes for the backup relay
//!
//! Implements the backup operations:
//! - POST /upload-backup - multipart ZIP upload, forwarded to the bucket
//! - GET /list-backups - enumerate stored archive keys
//! - GET /download-backup/*filename - stream one archive back
//!
//! Plus the operational surface: /healthz and /metrics.

mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use handlers::{download_backup, health, list_backups, metrics, upload_backup};

/// Create the relay router
pub fn create_router(state: AppState) -> Router {
    let max_upload = state.config.server.max_upload_bytes;
    Router::new()
        .route("/healthz", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route(
            "/upload-backup",
            post(handlers::upload_backup).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route("/list-backups", get(handlers::list_backups))
        .route("/download-backup/*filename", get(handlers::download_backup))
        .with_state(state)
}
