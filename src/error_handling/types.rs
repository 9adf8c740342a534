//! Error type definitions.

use std::path::PathBuf;
use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::models::FetchErrorKind;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client used for webhooks.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config file must be JSON or YAML: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A failed attempt to read a host's certificate.
///
/// Converted into `FetchOutcome::Failure` at the fetcher boundary; the display
/// string becomes the failure message.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Connection timeout for {host} ({stage} exceeded {timeout:?})")]
    Timeout {
        host: String,
        stage: &'static str,
        timeout: Duration,
    },

    #[error("DNS resolution failed for {host}: {detail}")]
    Dns { host: String, detail: String },

    #[error("SSL error for {host}: {detail}")]
    Tls { host: String, detail: String },

    #[error("Unexpected error for {host}: {detail}")]
    Unknown { host: String, detail: String },
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Timeout { .. } => FetchErrorKind::Timeout,
            FetchError::Dns { .. } => FetchErrorKind::Dns,
            FetchError::Tls { .. } => FetchErrorKind::Tls,
            FetchError::Unknown { .. } => FetchErrorKind::Unknown,
        }
    }

    pub(crate) fn unknown(host: &str, detail: impl ToString) -> Self {
        FetchError::Unknown {
            host: host.to_string(),
            detail: detail.to_string(),
        }
    }
}
