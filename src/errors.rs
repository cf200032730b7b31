//! Error types for the backup relay
//!
//! Provides structured error handling using thiserror for all error cases
//! encountered at the HTTP boundary. Every storage-collaborator failure is
//! converted into exactly one of these kinds before it reaches the client,
//! and every failure renders the same JSON envelope
//! `{"success": false, "message": "..."}`.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::storage::StorageError;

/// Main error type for relay operations
#[derive(Error, Debug)]
pub enum RelayError {
    /// Bad or missing input - the caller's fault
    #[error("{0}")]
    Validation(String),

    /// The storage collaborator rejected the calling identity
    #[error("AWS credentials are missing or invalid. Check the relay configuration.")]
    Credentials,

    /// Collaborator-reported failure carrying its own code and message
    #[error("S3 request failed: {message} (code {code})")]
    Storage { code: String, message: String },

    /// The requested key does not exist in the bucket
    #[error("File '{key}' not found in the backup bucket.")]
    NotFound { key: String },

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<StorageError> for RelayError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Credentials(_) => RelayError::Credentials,
            StorageError::Service { code, message } => RelayError::Storage { code, message },
            StorageError::NotFound { key } => RelayError::NotFound { key },
            StorageError::Other(detail) => RelayError::Internal(detail),
        }
    }
}

impl From<MultipartError> for RelayError {
    fn from(err: MultipartError) -> Self {
        RelayError::Validation(format!("Malformed multipart request: {err}"))
    }
}

/// JSON envelope returned for every failed request
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    success: bool,
    message: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::NotFound { .. } => StatusCode::NOT_FOUND,
            RelayError::Credentials | RelayError::Storage { .. } | RelayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let envelope = ErrorEnvelope {
            success: false,
            message: self.to_string(),
        };

        (status, Json(envelope)).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: RelayError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(RelayError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(RelayError::Credentials), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            status_of(RelayError::Storage {
                code: "SlowDown".into(),
                message: "Reduce your request rate.".into()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(RelayError::NotFound { key: "a.zip".into() }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RelayError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_error_conversion() {
        let err: RelayError = StorageError::NotFound { key: "x/y.zip".into() }.into();
        assert!(matches!(err, RelayError::NotFound { ref key } if key == "x/y.zip"));

        let err: RelayError = StorageError::Credentials("chain empty".into()).into();
        assert!(matches!(err, RelayError::Credentials));

        let err: RelayError = StorageError::Service {
            code: "AccessDenied".into(),
            message: "Access Denied".into(),
        }
        .into();
        assert!(err.to_string().contains("AccessDenied"));
        assert!(err.to_string().contains("Access Denied"));
    }
}
