//! Configuration file loading and validation.
//!
//! The checker is driven by a YAML or JSON file (selected by extension) that
//! lists the hosts to probe, the worker limit, the expiry thresholds and the
//! alert channels. The file is parsed into typed structs and validated once,
//! here, so the rest of the crate never sees malformed input.

use std::path::Path;
use std::time::Duration;

use lettre::message::Mailbox;
use log::warn;
use serde::Deserialize;

use crate::config::constants::{
    DEFAULT_CRITICAL_DAYS, DEFAULT_EMAIL_SUBJECT, DEFAULT_MAX_WORKERS, DEFAULT_SMTP_PORT,
    DEFAULT_TIMEOUT_SECS, DEFAULT_WARNING_DAYS,
};
use crate::error_handling::ConfigError;
use crate::models::{HostTarget, Thresholds};

/// Top-level checker configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckerConfig {
    /// Hosts to check
    #[serde(default, alias = "hosts")]
    pub websites: Vec<HostTarget>,

    /// Maximum number of hosts checked concurrently
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Per-stage network timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Expiry thresholds in days
    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    /// Alert channels
    #[serde(default)]
    pub alerts: AlertsConfig,
}

/// Expiry thresholds as written in the configuration file.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_critical_days")]
    pub critical: u32,
    #[serde(default = "default_warning_days")]
    pub warning: u32,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            critical: DEFAULT_CRITICAL_DAYS,
            warning: DEFAULT_WARNING_DAYS,
        }
    }
}

/// Alerting configuration: a global switch plus one entry per channel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub email: Option<EmailConfig>,
    #[serde(default)]
    pub webhook: Option<WebhookConfig>,
}

/// SMTP delivery parameters.
///
/// Every field has a default so a disabled stub parses; required values are
/// checked by [`CheckerConfig::validate`] only when the channel is enabled.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Upgrade the session with STARTTLS before authenticating
    #[serde(default = "default_true")]
    pub use_tls: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: Vec<String>,
    #[serde(default = "default_subject")]
    pub subject: String,
}

impl EmailConfig {
    /// Returns the credentials pair when both parts are configured and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}

/// Chat webhook flavour, selected by the `type` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WebhookKind {
    #[default]
    Slack,
    Teams,
}

impl WebhookKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookKind::Slack => "slack",
            WebhookKind::Teams => "teams",
        }
    }

    /// Parses a `type` value, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "slack" => Some(WebhookKind::Slack),
            "teams" => Some(WebhookKind::Teams),
            _ => None,
        }
    }
}

/// Webhook delivery parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub url: String,
    /// Raw `type` value; unknown values are only an error on an enabled channel
    #[serde(rename = "type", default = "default_webhook_type")]
    pub webhook_type: String,
}

impl WebhookConfig {
    /// The webhook flavour, or `None` when `type` names an unsupported service.
    pub fn kind(&self) -> Option<WebhookKind> {
        WebhookKind::parse(&self.webhook_type)
    }
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_critical_days() -> u32 {
    DEFAULT_CRITICAL_DAYS
}

fn default_warning_days() -> u32 {
    DEFAULT_WARNING_DAYS
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

fn default_subject() -> String {
    DEFAULT_EMAIL_SUBJECT.to_string()
}

fn default_webhook_type() -> String {
    WebhookKind::default().as_str().to_string()
}

fn default_true() -> bool {
    true
}

impl CheckerConfig {
    /// Parses configuration from a string in the given format and validates it.
    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: CheckerConfig = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Hosts to check, in configuration order.
    pub fn hosts(&self) -> &[HostTarget] {
        &self.websites
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            critical_days: self.thresholds.critical,
            warning_days: self.thresholds.warning,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Checks invariants the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == 0 {
            return Err(ConfigError::Invalid(
                "max_workers must be at least 1".to_string(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "timeout_seconds must be at least 1".to_string(),
            ));
        }
        for host in &self.websites {
            if host.hostname.trim().is_empty() {
                return Err(ConfigError::Invalid("hostname must not be empty".into()));
            }
            if host.port == 0 {
                return Err(ConfigError::Invalid(format!(
                    "port for {} must be between 1 and 65535",
                    host.hostname
                )));
            }
        }
        if self.thresholds.critical > self.thresholds.warning {
            warn!(
                "Critical threshold ({} days) is greater than warning threshold ({} days); \
                 WARNING status will never be reported",
                self.thresholds.critical, self.thresholds.warning
            );
        }

        if !self.alerts.enabled {
            return Ok(());
        }
        if let Some(email) = &self.alerts.email {
            validate_email(email)?;
        }
        if let Some(webhook) = &self.alerts.webhook {
            validate_webhook(webhook)?;
        }
        Ok(())
    }
}

fn validate_email(email: &EmailConfig) -> Result<(), ConfigError> {
    if !email.enabled {
        return Ok(());
    }
    if email.smtp_server.trim().is_empty() {
        return Err(ConfigError::Invalid("email.smtp_server must be set".into()));
    }
    if email.from.trim().is_empty() {
        return Err(ConfigError::Invalid("email.from must be set".into()));
    }
    if email.to.is_empty() {
        return Err(ConfigError::Invalid(
            "email.to must list at least one recipient".into(),
        ));
    }
    for address in std::iter::once(&email.from).chain(email.to.iter()) {
        address.parse::<Mailbox>().map_err(|e| {
            ConfigError::Invalid(format!("invalid email address '{address}': {e}"))
        })?;
    }
    Ok(())
}

fn validate_webhook(webhook: &WebhookConfig) -> Result<(), ConfigError> {
    if !webhook.enabled {
        return Ok(());
    }
    if webhook.kind().is_none() {
        return Err(ConfigError::Invalid(format!(
            "unsupported webhook type '{}', expected 'slack' or 'teams'",
            webhook.webhook_type
        )));
    }
    let parsed = url::Url::parse(&webhook.url)
        .map_err(|e| ConfigError::Invalid(format!("invalid webhook url '{}': {e}", webhook.url)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid(format!(
            "webhook url must use http or https, got '{other}'"
        ))),
    }
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from the file extension (`.json`, `.yml`, `.yaml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Some(ConfigFormat::Json),
            Some("yml") | Some("yaml") => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }
}

/// Loads and validates the configuration file at `path`.
///
/// # Errors
///
/// Returns an error if the file is missing or unreadable, has an unsupported
/// extension, fails to parse, or fails validation.
pub fn load_config(path: &Path) -> Result<CheckerConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let format =
        ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.into()))?;
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    CheckerConfig::from_str_with_format(&content, format)
}
