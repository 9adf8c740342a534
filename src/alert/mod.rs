//! Alert rendering and delivery.
//!
//! After a run, the results that need attention are rendered once per enabled
//! channel and delivered concurrently. A channel failure is logged and
//! reported in its [`ChannelReport`]; it never aborts the other channels or
//! changes the process exit code.

pub mod email;
pub mod payload;
pub mod slack;
pub mod teams;
mod webhook;

use chrono::Utc;
use futures::future::join_all;
use log::{error, info};

use crate::config::{AlertsConfig, EmailConfig, WebhookConfig, WebhookKind};
use crate::models::CheckResult;

pub use payload::{
    build_payload, render, AlertEntry, AlertPayload, AlertSummary, ChannelKind, EmailContent,
};

/// A configured, enabled delivery channel.
#[derive(Debug, Clone, Copy)]
pub enum Channel<'a> {
    Email(&'a EmailConfig),
    Webhook(&'a WebhookConfig, WebhookKind),
}

impl Channel<'_> {
    pub fn kind(&self) -> ChannelKind {
        match self {
            Channel::Email(_) => ChannelKind::Email,
            Channel::Webhook(_, kind) => ChannelKind::Webhook(*kind),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Channel::Email(_) => "email",
            Channel::Webhook(_, kind) => kind.as_str(),
        }
    }
}

/// Lists the channels enabled in `alerts`. Empty when the global switch is off.
///
/// A webhook with an unsupported `type` is logged and skipped.
pub fn enabled_channels(alerts: &AlertsConfig) -> Vec<Channel<'_>> {
    if !alerts.enabled {
        return Vec::new();
    }
    let mut channels = Vec::new();
    if let Some(email) = alerts.email.as_ref().filter(|e| e.enabled) {
        channels.push(Channel::Email(email));
    }
    if let Some(webhook) = alerts.webhook.as_ref().filter(|w| w.enabled) {
        match webhook.kind() {
            Some(kind) => channels.push(Channel::Webhook(webhook, kind)),
            None => error!("Unsupported webhook type: {}", webhook.webhook_type),
        }
    }
    channels
}

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Failed { reason: String },
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendOutcome::Sent)
    }
}

/// Delivery outcome for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReport {
    pub channel: &'static str,
    pub outcome: SendOutcome,
}

/// Delivers a rendered payload over `channel`.
///
/// Makes a single attempt. Never fails: errors are logged and returned as
/// [`SendOutcome::Failed`].
pub async fn send(
    payload: &AlertPayload,
    channel: Channel<'_>,
    client: &reqwest::Client,
) -> SendOutcome {
    let result = match (payload, channel) {
        (AlertPayload::Email(content), Channel::Email(config)) => {
            email::send_email(config, content).await
        }
        (AlertPayload::Webhook { body, .. }, Channel::Webhook(config, _)) => {
            webhook::post_json(client, &config.url, body).await
        }
        _ => Err(anyhow::anyhow!(
            "payload was not rendered for the {} channel",
            channel.name()
        )),
    };

    match result {
        Ok(()) => {
            info!("{} alert sent successfully", channel.name());
            SendOutcome::Sent
        }
        Err(e) => {
            error!("Failed to send {} alert: {:#}", channel.name(), e);
            SendOutcome::Failed {
                reason: format!("{e:#}"),
            }
        }
    }
}

/// Renders and delivers alerts for `results` on every enabled channel.
///
/// Does nothing when alerting is disabled, no channel is enabled, or no host
/// needs an alert. Channels are attempted concurrently and independently.
pub async fn send_alerts(
    results: &[CheckResult],
    alerts: &AlertsConfig,
    client: &reqwest::Client,
) -> Vec<ChannelReport> {
    if !alerts.enabled {
        info!("Alerts are disabled");
        return Vec::new();
    }

    let channels = enabled_channels(alerts);
    if channels.is_empty() {
        info!("No alert channels enabled");
        return Vec::new();
    }

    let Some(summary) = AlertSummary::from_results(results, Utc::now()) else {
        info!("No certificates require alerts");
        return Vec::new();
    };
    info!(
        "Sending alerts for {} certificate(s) via {} channel(s)",
        summary.entries.len(),
        channels.len()
    );

    let attempts = channels.into_iter().map(|channel| {
        let payload = render(&summary, channel.kind());
        async move {
            ChannelReport {
                channel: channel.name(),
                outcome: send(&payload, channel, client).await,
            }
        }
    });

    join_all(attempts).await
}
