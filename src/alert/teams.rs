//! Microsoft Teams connector card (legacy `MessageCard` schema).

use serde_json::json;

use crate::alert::payload::AlertSummary;
use crate::config::ALERT_FOOTER;

const URGENT_COLOR: &str = "FF0000";
const WARNING_COLOR: &str = "FF9900";

/// Formats the summary as a Teams `MessageCard` with one section per host.
pub fn format_message(summary: &AlertSummary) -> serde_json::Value {
    let theme_color = if summary.has_urgent() {
        URGENT_COLOR
    } else {
        WARNING_COLOR
    };

    let sections: Vec<serde_json::Value> = summary
        .entries
        .iter()
        .map(|entry| {
            let activity_title = if entry.expired {
                format!("Certificate EXPIRED: {}", entry.hostname)
            } else {
                format!("Certificate Alert: {}", entry.hostname)
            };
            let detail_name = if entry.error.is_some() { "Error" } else { "Details" };

            json!({
                "activityTitle": activity_title,
                "facts": [
                    {"name": "Website", "value": entry.target},
                    {"name": "Status", "value": entry.status.as_str()},
                    {"name": "Days Until Expiry", "value": entry.days_label()},
                    {"name": "Expiry Date", "value": entry.expiry_label()},
                    {"name": detail_name, "value": entry.details()}
                ]
            })
        })
        .collect();

    json!({
        "@type": "MessageCard",
        "@context": "https://schema.org/extensions",
        "summary": "SSL Certificate Alert",
        "themeColor": theme_color,
        "title": "⚠️ SSL Certificate Alert",
        "sections": sections,
        "text": format!(
            "{} - {}",
            ALERT_FOOTER,
            summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::payload::AlertEntry;
    use crate::models::CertificateStatus;
    use chrono::{TimeZone, Utc};

    fn entry(host: &str, status: CertificateStatus, days: i64) -> AlertEntry {
        AlertEntry {
            target: format!("{host}:443"),
            hostname: host.to_string(),
            status,
            days_until_expiry: Some(days),
            expiry: Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap() + chrono::Duration::days(days)),
            expired: days < 0,
            error: None,
        }
    }

    fn summary(entries: Vec<AlertEntry>) -> AlertSummary {
        AlertSummary {
            entries,
            generated_at: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_message_card_envelope() {
        let card = format_message(&summary(vec![entry(
            "a.example.com",
            CertificateStatus::Warning,
            20,
        )]));
        assert_eq!(card["@type"], "MessageCard");
        assert_eq!(card["@context"], "https://schema.org/extensions");
        assert_eq!(card["summary"], "SSL Certificate Alert");
        assert_eq!(card["themeColor"], WARNING_COLOR);
        assert!(card["text"].as_str().unwrap().contains("2026-03-01 00:00:00 UTC"));
    }

    #[test]
    fn test_urgent_theme_and_expired_title() {
        let card = format_message(&summary(vec![
            entry("gone.example.com", CertificateStatus::Critical, -3),
            entry("a.example.com", CertificateStatus::Warning, 20),
        ]));
        assert_eq!(card["themeColor"], URGENT_COLOR);
        let sections = card["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0]["activityTitle"], "Certificate EXPIRED: gone.example.com");
        assert_eq!(sections[0]["facts"][2]["value"], "-3");
        assert_eq!(sections[0]["facts"][4]["value"], "Certificate has expired");
        assert_eq!(sections[1]["activityTitle"], "Certificate Alert: a.example.com");
    }
}
