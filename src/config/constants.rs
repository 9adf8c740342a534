//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, configuration defaults, and process exit codes.

use std::time::Duration;

/// Default port probed when a host entry does not specify one
pub const DEFAULT_PORT: u16 = 443;
/// Default number of hosts checked concurrently
pub const DEFAULT_MAX_WORKERS: usize = 5;
/// Default per-stage network timeout (DNS, TCP connect, TLS handshake) in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Days remaining at or below which a certificate is CRITICAL
pub const DEFAULT_CRITICAL_DAYS: u32 = 7;
/// Days remaining at or below which a certificate is WARNING
pub const DEFAULT_WARNING_DAYS: u32 = 30;

// Alert delivery
/// Webhook POST timeout
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);
/// SMTP session timeout (connect, STARTTLS, auth and transmit share it)
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_EMAIL_SUBJECT: &str = "SSL Certificate Alert";
/// Note rendered for alerting hosts that have no error message
pub const DEFAULT_ALERT_NOTE: &str = "Certificate expiring soon";
/// Note rendered for hosts whose certificate is already past notAfter
pub const EXPIRED_ALERT_NOTE: &str = "Certificate has expired";
/// Footer attached to webhook payloads
pub const ALERT_FOOTER: &str = "SSL Certificate Checker";

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

// Process exit codes
pub const EXIT_OK: i32 = 0;
/// One or more hosts could not be checked, or the run itself failed
pub const EXIT_ERROR: i32 = 1;
/// One or more certificates are CRITICAL; takes precedence over EXIT_ERROR
pub const EXIT_CRITICAL: i32 = 2;
pub const EXIT_INTERRUPTED: i32 = 130;

pub const SECONDS_PER_DAY: i64 = 86_400;
