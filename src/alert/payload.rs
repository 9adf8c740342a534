//! Provider-agnostic alert content.
//!
//! [`AlertSummary`] is the filtered, ordered view of a result set that every
//! channel renders from. Only WARNING, CRITICAL and ERROR hosts are kept; an
//! all-OK run yields no summary at all, which callers treat as "nothing to
//! send".

use chrono::{DateTime, Utc};

use crate::alert::{email, slack, teams};
use crate::config::{WebhookKind, DEFAULT_ALERT_NOTE, EXPIRED_ALERT_NOTE};
use crate::models::{CertificateStatus, CheckResult};

/// One alerting host, flattened for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEntry {
    /// `hostname:port`
    pub target: String,
    pub hostname: String,
    pub status: CertificateStatus,
    pub days_until_expiry: Option<i64>,
    pub expiry: Option<DateTime<Utc>>,
    pub expired: bool,
    pub error: Option<String>,
}

impl AlertEntry {
    fn from_result(result: &CheckResult) -> Self {
        Self {
            target: result.host.to_string(),
            hostname: result.host.hostname.clone(),
            status: result.status,
            days_until_expiry: result.days_until_expiry,
            expiry: result.expiry(),
            expired: result.is_expired(),
            error: result.error_message().map(str::to_string),
        }
    }

    pub fn days_label(&self) -> String {
        self.days_until_expiry
            .map(|days| days.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn expiry_label(&self) -> String {
        self.expiry
            .map(|expiry| expiry.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// The error message, or a note describing why the host is alerting.
    pub fn details(&self) -> &str {
        match &self.error {
            Some(error) => error,
            None if self.expired => EXPIRED_ALERT_NOTE,
            None => DEFAULT_ALERT_NOTE,
        }
    }
}

/// Filtered set of results that need an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSummary {
    /// Most urgent first (CRITICAL, ERROR, WARNING), then by `hostname:port`
    pub entries: Vec<AlertEntry>,
    /// Only used for footer metadata
    pub generated_at: DateTime<Utc>,
}

impl AlertSummary {
    /// Builds the summary, or `None` when no result needs an alert.
    pub fn from_results(results: &[CheckResult], generated_at: DateTime<Utc>) -> Option<Self> {
        let mut entries: Vec<AlertEntry> = results
            .iter()
            .filter(|result| result.status.needs_alert())
            .map(AlertEntry::from_result)
            .collect();
        if entries.is_empty() {
            return None;
        }
        entries.sort_by(|a, b| {
            a.status
                .alert_rank()
                .cmp(&b.status.alert_rank())
                .then_with(|| a.target.cmp(&b.target))
        });
        Some(Self {
            entries,
            generated_at,
        })
    }

    pub fn count(&self, status: CertificateStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    pub fn has_urgent(&self) -> bool {
        self.entries.iter().any(|e| {
            matches!(
                e.status,
                CertificateStatus::Critical | CertificateStatus::Error
            )
        })
    }
}

/// Delivery mechanism a payload is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Email,
    Webhook(WebhookKind),
}

/// Rendered email bodies. The subject comes from the channel configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub text: String,
    pub html: String,
}

/// Channel-specific rendering of an [`AlertSummary`].
#[derive(Debug, Clone, PartialEq)]
pub enum AlertPayload {
    Email(EmailContent),
    Webhook {
        kind: WebhookKind,
        body: serde_json::Value,
    },
}

/// Renders a summary for the given channel.
pub fn render(summary: &AlertSummary, kind: ChannelKind) -> AlertPayload {
    match kind {
        ChannelKind::Email => AlertPayload::Email(email::render(summary)),
        ChannelKind::Webhook(WebhookKind::Slack) => AlertPayload::Webhook {
            kind: WebhookKind::Slack,
            body: slack::format_message(summary),
        },
        ChannelKind::Webhook(WebhookKind::Teams) => AlertPayload::Webhook {
            kind: WebhookKind::Teams,
            body: teams::format_message(summary),
        },
    }
}

/// Filters `results` and renders them for `kind`.
///
/// Returns `None` when every host is OK: there is nothing to send.
pub fn build_payload(
    results: &[CheckResult],
    kind: ChannelKind,
    generated_at: DateTime<Utc>,
) -> Option<AlertPayload> {
    AlertSummary::from_results(results, generated_at).map(|summary| render(&summary, kind))
}
