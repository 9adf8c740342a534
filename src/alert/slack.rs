//! Slack incoming-webhook message.

use serde_json::json;

use crate::alert::payload::AlertSummary;
use crate::config::ALERT_FOOTER;
use crate::models::CertificateStatus;

/// Formats the summary as a Slack message with one attachment per host.
pub fn format_message(summary: &AlertSummary) -> serde_json::Value {
    let attachments: Vec<serde_json::Value> = summary
        .entries
        .iter()
        .map(|entry| {
            let color = match entry.status {
                CertificateStatus::Critical | CertificateStatus::Error => "danger",
                CertificateStatus::Warning => "warning",
                CertificateStatus::Ok => "good",
            };

            let mut fields = vec![
                json!({
                    "title": "Website",
                    "value": entry.target,
                    "short": true
                }),
                json!({
                    "title": "Status",
                    "value": entry.status.as_str(),
                    "short": true
                }),
                json!({
                    "title": "Days Until Expiry",
                    "value": entry.days_label(),
                    "short": true
                }),
                json!({
                    "title": "Expiry Date",
                    "value": entry.expiry_label(),
                    "short": true
                }),
            ];

            let title = if entry.error.is_some() { "Error" } else { "Details" };
            fields.push(json!({
                "title": title,
                "value": entry.details(),
                "short": false
            }));

            json!({
                "color": color,
                "fields": fields,
                "footer": ALERT_FOOTER,
                "ts": summary.generated_at.timestamp()
            })
        })
        .collect();

    json!({
        "text": "⚠️ SSL Certificate Alert",
        "attachments": attachments
    })
}
