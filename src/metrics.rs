//! Prometheus metrics for the backup relay
//!
//! Defines metrics for:
//! - Storage collaborator calls by operation and outcome
//! - Uploaded bytes

use lazy_static::lazy_static;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

use crate::storage::StorageError;

lazy_static! {
    /// Registry for all metrics
    pub static ref REGISTRY: Registry = Registry::new();

    /// Storage operation counter by operation and outcome
    pub static ref STORAGE_OPERATIONS: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "backup_relay_storage_operations_total",
            "Total storage collaborator calls"
        ),
        &["operation", "outcome"]
    )
    .expect("Failed to create STORAGE_OPERATIONS metric");

    /// Bytes accepted for upload and forwarded to storage
    pub static ref UPLOAD_BYTES: IntCounter = IntCounter::new(
        "backup_relay_upload_bytes_total",
        "Total bytes forwarded to the storage bucket"
    )
    .expect("Failed to create UPLOAD_BYTES metric");
}

/// Initialize metrics and register with the global registry
pub fn init_metrics() {
    REGISTRY.register(Box::new(STORAGE_OPERATIONS.clone())).unwrap();
    REGISTRY.register(Box::new(UPLOAD_BYTES.clone())).unwrap();
}

/// Count one storage collaborator call under its operation label
pub fn observe_storage_op<T>(operation: &str, result: &Result<T, StorageError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(_) => "error",
    };
    STORAGE_OPERATIONS
        .with_label_values(&[operation, outcome])
        .inc();
}
