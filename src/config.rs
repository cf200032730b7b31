//! Configuration management for the backup relay
//!
//! Supports configuration via:
//! - Environment variables (primary)
//! - Optional TOML config file (secondary)
//!
//! Environment variables take precedence over config file values.
//! AWS credentials are deliberately absent from this layer: they resolve
//! through the default AWS credential provider chain (environment,
//! profile, IMDS, IRSA) and are never read from source or the TOML file.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Storage collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket holding the backup archives. Required; there is no default.
    #[serde(default)]
    pub bucket: String,

    /// AWS region (defaults to us-east-1)
    #[serde(default = "default_region")]
    pub region: String,

    /// Endpoint URL override for S3-compatible services
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl StorageConfig {
    /// Public HTTPS URL of an object in the configured bucket.
    pub fn object_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_region(),
            endpoint: None,
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Request timeout in seconds (default: 300)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Max accepted upload size in bytes (default: 1GiB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            timeout_secs: default_timeout_secs(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_bind_address() -> SocketAddr {
    "0.0.0.0:8080".parse().unwrap()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_max_upload_bytes() -> usize {
    1024 * 1024 * 1024 // 1GiB
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage collaborator configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log level (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - BACKUP_RELAY_BUCKET: bucket name (required unless set in config file)
    /// - BACKUP_RELAY_REGION: AWS region (default: us-east-1)
    /// - BACKUP_RELAY_ENDPOINT: custom endpoint URL (optional)
    /// - BACKUP_RELAY_BIND_ADDRESS: server bind address (default: 0.0.0.0:8080)
    /// - BACKUP_RELAY_TIMEOUT_SECS: request timeout (default: 300)
    /// - BACKUP_RELAY_MAX_UPLOAD_BYTES: max upload size in bytes (default: 1GiB)
    /// - BACKUP_RELAY_LOG_LEVEL: log level (default: info)
    /// - BACKUP_RELAY_CONFIG_FILE: optional path to TOML config file
    pub fn from_env() -> anyhow::Result<Self> {
        // Try to load from config file first if specified
        let config_file = std::env::var("BACKUP_RELAY_CONFIG_FILE").ok();
        let mut config = if let Some(path) = &config_file {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        // Override with environment variables
        if let Ok(bucket) = std::env::var("BACKUP_RELAY_BUCKET") {
            config.storage.bucket = bucket;
        }

        if let Ok(region) = std::env::var("BACKUP_RELAY_REGION") {
            config.storage.region = region;
        }

        if let Ok(endpoint) = std::env::var("BACKUP_RELAY_ENDPOINT") {
            config.storage.endpoint = Some(endpoint);
        }

        if let Ok(addr) = std::env::var("BACKUP_RELAY_BIND_ADDRESS") {
            config.server.bind_address = addr
                .parse()
                .context("invalid BACKUP_RELAY_BIND_ADDRESS")?;
        }

        if let Ok(timeout) = std::env::var("BACKUP_RELAY_TIMEOUT_SECS") {
            config.server.timeout_secs = timeout
                .parse()
                .context("invalid BACKUP_RELAY_TIMEOUT_SECS")?;
        }

        if let Ok(size) = std::env::var("BACKUP_RELAY_MAX_UPLOAD_BYTES") {
            config.server.max_upload_bytes = size
                .parse()
                .context("invalid BACKUP_RELAY_MAX_UPLOAD_BYTES")?;
        }

        if let Ok(level) = std::env::var("BACKUP_RELAY_LOG_LEVEL") {
            config.log_level = level;
        }

        if config.storage.bucket.is_empty() {
            bail!(
                "no storage bucket configured: set BACKUP_RELAY_BUCKET or storage.bucket in the config file"
            );
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {path}"))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config file {path}"))?;
        Ok(config)
    }
}
