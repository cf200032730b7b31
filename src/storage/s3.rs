//! AWS S3 storage backend
//!
//! Thin wrapper over aws-sdk-s3 that folds every SDK failure into the
//! relay's `StorageError` taxonomy. Authentication relies on the default
//! AWS credential provider chain:
//! - Environment variables (AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY)
//! - Shared config/credentials profiles
//! - EC2 instance metadata / ECS task role / IRSA

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::debug;

use crate::config::StorageConfig;
use crate::storage::{ObjectStorage, StorageError};

/// AWS S3 storage backend
pub struct S3Backend {
    client: Client,
    bucket: String,
}

impl S3Backend {
    /// Create a new S3 backend for the configured bucket
    ///
    /// An endpoint override switches the client to path-style addressing,
    /// which S3-compatible stores like MinIO expect.
    pub async fn new(config: &StorageConfig) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStorage for S3Backend {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| classify(e, None))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        // Follow continuation tokens until the listing is exhausted; a
        // single page caps out at 1000 keys.
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let page = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| classify(e, None))?;

            for object in page.contents() {
                if let Some(key) = object.key() {
                    keys.push(key.to_string());
                }
            }

            match page.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
            debug!(count = keys.len(), "listing continues on next page");
        }

        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Bytes, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify(e, Some(key)))?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Other(format!("reading object body: {e}")))?;
        Ok(data.into_bytes())
    }
}

/// Fold an SDK error into the relay's storage failure taxonomy
///
/// Service errors keep their S3 code and message. Identity failures show up
/// either as credential-flavored construction/dispatch errors or as the
/// handful of service codes that reject the calling identity. `key` marks
/// operations where a missing object is a distinct outcome.
fn classify<E>(err: SdkError<E>, key: Option<&str>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    match &err {
        SdkError::ServiceError(_) => {
            let code = err.code().unwrap_or("Unknown").to_string();
            let message = err
                .message()
                .unwrap_or("no further detail from the service")
                .to_string();
            match (code.as_str(), key) {
                ("NoSuchKey" | "NotFound", Some(key)) => StorageError::NotFound {
                    key: key.to_string(),
                },
                ("InvalidAccessKeyId" | "SignatureDoesNotMatch" | "ExpiredToken", _) => {
                    StorageError::Credentials(format!("{code}: {message}"))
                }
                _ => StorageError::Service { code, message },
            }
        }
        _ => {
            let detail = DisplayErrorContext(&err).to_string();
            if detail.to_ascii_lowercase().contains("credential") {
                StorageError::Credentials(detail)
            } else {
                StorageError::Other(detail)
            }
        }
    }
}
