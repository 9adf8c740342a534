//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, defaults, exit codes)
//! - Configuration file loading and validation
//! - CLI option types and parsing

mod constants;
pub mod file;
mod types;

// Re-export all constants
pub use constants::*;
pub use file::{
    load_config, AlertsConfig, CheckerConfig, ConfigFormat, EmailConfig, ThresholdsConfig,
    WebhookConfig, WebhookKind,
};
pub use types::{LogFormat, LogLevel, Opt};
