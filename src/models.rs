//! Data models shared across the checker pipeline.
//!
//! A run turns each [`HostTarget`] into exactly one [`FetchOutcome`], which the
//! classifier folds into a [`CheckResult`]. Results are collected once per run
//! and reused for the console report, alerting and the exit code.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use strum_macros::EnumIter as EnumIterMacro;

use crate::config::{DEFAULT_CRITICAL_DAYS, DEFAULT_PORT, DEFAULT_WARNING_DAYS};

/// A TLS endpoint to probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct HostTarget {
    pub hostname: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl HostTarget {
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self {
            hostname: hostname.into(),
            port,
        }
    }
}

impl fmt::Display for HostTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hostname, self.port)
    }
}

/// Category of a failed certificate fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FetchErrorKind {
    /// Resolution, connect or handshake did not finish within the timeout
    Timeout,
    /// The hostname did not resolve
    Dns,
    /// The TLS handshake failed (protocol or trust error)
    Tls,
    /// Anything else: refused connections, missing or unparsable certificates
    Unknown,
}

impl FetchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::Timeout => "Timeout error",
            FetchErrorKind::Dns => "DNS error",
            FetchErrorKind::Tls => "TLS error",
            FetchErrorKind::Unknown => "Unknown error",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of probing a single host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success {
        /// The leaf certificate's notAfter instant
        expiry: DateTime<Utc>,
    },
    Failure {
        kind: FetchErrorKind,
        message: String,
    },
}

impl FetchOutcome {
    pub fn failure(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        FetchOutcome::Failure {
            kind,
            message: message.into(),
        }
    }
}

/// Severity assigned to a host for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum CertificateStatus {
    Ok,
    Warning,
    Critical,
    Error,
}

impl CertificateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificateStatus::Ok => "OK",
            CertificateStatus::Warning => "WARNING",
            CertificateStatus::Critical => "CRITICAL",
            CertificateStatus::Error => "ERROR",
        }
    }

    /// Whether a host with this status belongs in alerts.
    pub fn needs_alert(&self) -> bool {
        !matches!(self, CertificateStatus::Ok)
    }

    /// Ordering used when rendering alerts: most urgent first.
    pub(crate) fn alert_rank(&self) -> u8 {
        match self {
            CertificateStatus::Critical => 0,
            CertificateStatus::Error => 1,
            CertificateStatus::Warning => 2,
            CertificateStatus::Ok => 3,
        }
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day-count boundaries for WARNING and CRITICAL.
///
/// `critical_days <= warning_days` is expected but not enforced; the two are
/// evaluated independently with CRITICAL checked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub critical_days: u32,
    pub warning_days: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            critical_days: DEFAULT_CRITICAL_DAYS,
            warning_days: DEFAULT_WARNING_DAYS,
        }
    }
}

/// Classified result for one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub host: HostTarget,
    pub outcome: FetchOutcome,
    pub days_until_expiry: Option<i64>,
    pub status: CertificateStatus,
}

impl CheckResult {
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        match &self.outcome {
            FetchOutcome::Success { expiry } => Some(*expiry),
            FetchOutcome::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            FetchOutcome::Success { .. } => None,
            FetchOutcome::Failure { message, .. } => Some(message.as_str()),
        }
    }

    pub fn error_kind(&self) -> Option<FetchErrorKind> {
        match &self.outcome {
            FetchOutcome::Success { .. } => None,
            FetchOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// True when the certificate's notAfter is already in the past.
    pub fn is_expired(&self) -> bool {
        self.days_until_expiry.is_some_and(|days| days < 0)
    }
}
