//! Backup Relay - HTTP facade for ZIP backup archives stored in S3
//!
//! This service accepts ZIP uploads over HTTP and forwards them to an
//! object-storage bucket, lists the stored archives, and streams a named
//! archive back to the caller. All durable state lives in the bucket;
//! the relay itself is stateless across requests.

pub mod config;
pub mod errors;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod storage;

use std::sync::Arc;

use crate::config::Config;
use crate::storage::ObjectStorage;

/// Shared state handed to every request handler.
///
/// The storage collaborator is injected behind a trait object so tests can
/// substitute an in-memory fake for the real S3 client.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn ObjectStorage>,
    pub config: Arc<Config>,
}
