//! Storage collaborator abstraction
//!
//! The relay never talks to S3 directly from its handlers; everything goes
//! through the `ObjectStorage` trait so tests can inject an in-memory fake.
//! The only production implementation is the AWS S3 backend.

mod s3;

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;

pub use s3::S3Backend;

/// Failure taxonomy for storage collaborator calls
///
/// Every SDK failure is folded into one of these kinds at the backend
/// boundary; the HTTP layer maps each kind to exactly one response shape.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    /// Credentials could not be resolved or were rejected
    #[error("credentials rejected or unresolved: {0}")]
    Credentials(String),

    /// The service answered with an error code and message
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    /// The requested key does not exist
    #[error("no object with key {key}")]
    NotFound { key: String },

    /// Anything else (connection failures, body read errors, ...)
    #[error("{0}")]
    Other(String),
}

/// Object storage operations used by the relay
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store an object under `key` with the given content type
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError>;

    /// Enumerate every key in the bucket
    async fn list(&self) -> Result<Vec<String>, StorageError>;

    /// Fetch the object stored under `key`
    async fn get(&self, key: &str) -> Result<Bytes, StorageError>;
}

/// Create the storage backend from configuration
///
/// Credentials resolve through the default AWS provider chain; nothing is
/// read from the relay's own configuration.
pub async fn create_backend(config: &Config) -> Arc<dyn ObjectStorage> {
    Arc::new(S3Backend::new(&config.storage).await)
}
