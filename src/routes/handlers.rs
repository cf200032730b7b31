//! Request handlers for the backup relay endpoints

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::errors::{RelayError, Result};
use crate::metrics::{observe_storage_op, REGISTRY, UPLOAD_BYTES};
use crate::AppState;

/// Multipart form field carrying the archive
pub const UPLOAD_FIELD: &str = "backup_file";

/// Content type declared on every stored archive
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Success envelope for uploads
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub s3_url: String,
    pub filename_on_s3: String,
}

/// Success envelope for listings
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub files: Vec<String>,
}

/// Health check endpoint
#[instrument]
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Prometheus metrics endpoint
#[instrument]
pub async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Upload - POST /upload-backup
///
/// Expects a multipart request with the archive under the `backup_file`
/// field. The filename becomes the object key verbatim.
#[instrument(skip(state, multipart))]
pub async fn upload_backup(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        validate_zip_filename(&filename)?;
        let body = field.bytes().await?;
        upload = Some((filename, body));
        break;
    }

    let Some((filename, body)) = upload else {
        return Err(RelayError::Validation(format!(
            "No '{UPLOAD_FIELD}' file field found in the request."
        )));
    };

    info!(filename = %filename, size = body.len(), "Upload request");

    let size = body.len();
    let result = state.storage.put(&filename, body, ZIP_CONTENT_TYPE).await;
    observe_storage_op("put", &result);
    result.map_err(|e| {
        error!(error = %e, filename = %filename, "Storage put failed");
        RelayError::from(e)
    })?;
    UPLOAD_BYTES.inc_by(size as u64);

    let s3_url = state.config.storage.object_url(&filename);
    info!(url = %s3_url, "Archive stored");

    Ok(Json(UploadResponse {
        success: true,
        message: "ZIP archive uploaded successfully.".to_string(),
        s3_url,
        filename_on_s3: filename,
    }))
}

/// List - GET /list-backups
#[instrument(skip(state))]
pub async fn list_backups(State(state): State<AppState>) -> Result<Json<ListResponse>> {
    let result = state.storage.list().await;
    observe_storage_op("list", &result);
    let files = result.map_err(|e| {
        error!(error = %e, "Storage list failed");
        RelayError::from(e)
    })?;

    info!(count = files.len(), "List request");

    Ok(Json(ListResponse {
        success: true,
        files,
    }))
}

/// Download - GET /download-backup/*filename
///
/// The wildcard segment is the object key and may itself contain `/`.
#[instrument(skip(state))]
pub async fn download_backup(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    info!(filename = %filename, "Download request");

    let result = state.storage.get(&filename).await;
    observe_storage_op("get", &result);
    let data = result.map_err(|e| {
        error!(error = %e, filename = %filename, "Storage get failed");
        RelayError::from(e)
    })?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, ZIP_CONTENT_TYPE)
        .header(header::CONTENT_LENGTH, data.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(data))
        .map_err(|e| RelayError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}

/// Reject filenames that are empty or not ZIP archives
fn validate_zip_filename(filename: &str) -> Result<()> {
    if filename.is_empty() {
        return Err(RelayError::Validation("Empty filename.".to_string()));
    }
    if !filename.to_lowercase().ends_with(".zip") {
        return Err(RelayError::Validation(
            "File type not allowed. Only ZIP archives are accepted.".to_string(),
        ));
    }
    Ok(())
}
