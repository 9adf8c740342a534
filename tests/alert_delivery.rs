//! Alert delivery against mock webhook endpoints and an unreachable SMTP relay.

mod helpers;

use chrono::Utc;
use serde_json::Value;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cert_expiry::alert::{build_payload, AlertPayload, ChannelKind};
use cert_expiry::config::{AlertsConfig, EmailConfig, WebhookConfig, WebhookKind};
use cert_expiry::initialization::init_webhook_client;
use cert_expiry::{send_alerts, CertificateStatus, SendOutcome};

use helpers::{closed_port, result};

fn webhook(url: String, kind: WebhookKind) -> WebhookConfig {
    WebhookConfig {
        enabled: true,
        url,
        webhook_type: kind.as_str().to_string(),
    }
}

fn unreachable_email(port: u16) -> EmailConfig {
    EmailConfig {
        enabled: true,
        smtp_server: "127.0.0.1".to_string(),
        smtp_port: port,
        use_tls: false,
        username: None,
        password: None,
        from: "alerts@example.com".to_string(),
        to: vec!["ops@example.com".to_string()],
        subject: "SSL Certificate Alert".to_string(),
    }
}

fn alerting_results() -> Vec<cert_expiry::CheckResult> {
    vec![
        result("ok.example.com", CertificateStatus::Ok, Some(120)),
        result("soon.example.com", CertificateStatus::Warning, Some(21)),
        result("down.example.com", CertificateStatus::Error, None),
    ]
}

#[tokio::test]
async fn test_slack_webhook_receives_alert() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/slack"))
        .and(body_partial_json(serde_json::json!({
            "text": "⚠️ SSL Certificate Alert"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let alerts = AlertsConfig {
        enabled: true,
        email: None,
        webhook: Some(webhook(format!("{}/slack", server.uri()), WebhookKind::Slack)),
    };
    let client = init_webhook_client().expect("Failed to build client");
    let reports = send_alerts(&alerting_results(), &alerts, &client).await;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].channel, "slack");
    assert_eq!(reports[0].outcome, SendOutcome::Sent);

    let received = server.received_requests().await.expect("Recording disabled");
    let body: Value = serde_json::from_slice(&received[0].body).expect("Invalid JSON body");
    let attachments = body["attachments"].as_array().expect("No attachments");
    // The OK host is filtered out, ERROR sorts before WARNING
    assert_eq!(attachments.len(), 2);
    assert_eq!(attachments[0]["fields"][0]["value"], "down.example.com:443");
    assert_eq!(attachments[1]["fields"][0]["value"], "soon.example.com:443");
}

#[tokio::test]
async fn test_teams_webhook_receives_message_card() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/teams"))
        .and(body_partial_json(serde_json::json!({
            "@type": "MessageCard",
            "summary": "SSL Certificate Alert"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let alerts = AlertsConfig {
        enabled: true,
        email: None,
        webhook: Some(webhook(format!("{}/teams", server.uri()), WebhookKind::Teams)),
    };
    let client = init_webhook_client().expect("Failed to build client");
    let reports = send_alerts(&alerting_results(), &alerts, &client).await;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].channel, "teams");
    assert!(reports[0].outcome.is_sent());
}

#[tokio::test]
async fn test_webhook_error_status_is_reported_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let alerts = AlertsConfig {
        enabled: true,
        email: None,
        webhook: Some(webhook(server.uri(), WebhookKind::Slack)),
    };
    let client = init_webhook_client().expect("Failed to build client");
    let reports = send_alerts(&alerting_results(), &alerts, &client).await;

    assert_eq!(reports.len(), 1);
    match &reports[0].outcome {
        SendOutcome::Failed { reason } => {
            assert!(reason.contains("500"), "reason: {reason}");
        }
        SendOutcome::Sent => panic!("500 response must not count as sent"),
    }
}

#[tokio::test]
async fn test_email_failure_does_not_block_webhook() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let alerts = AlertsConfig {
        enabled: true,
        email: Some(unreachable_email(closed_port().await)),
        webhook: Some(webhook(server.uri(), WebhookKind::Slack)),
    };
    let client = init_webhook_client().expect("Failed to build client");
    let reports = send_alerts(&alerting_results(), &alerts, &client).await;

    assert_eq!(reports.len(), 2);
    let email = reports.iter().find(|r| r.channel == "email").expect("No email report");
    let slack = reports.iter().find(|r| r.channel == "slack").expect("No slack report");
    assert!(!email.outcome.is_sent());
    assert!(slack.outcome.is_sent());
}

#[tokio::test]
async fn test_all_ok_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let alerts = AlertsConfig {
        enabled: true,
        email: None,
        webhook: Some(webhook(server.uri(), WebhookKind::Slack)),
    };
    let results = vec![result("ok.example.com", CertificateStatus::Ok, Some(120))];
    let client = init_webhook_client().expect("Failed to build client");

    assert!(send_alerts(&results, &alerts, &client).await.is_empty());
}

#[tokio::test]
async fn test_disabled_alerts_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let alerts = AlertsConfig {
        enabled: false,
        email: None,
        webhook: Some(webhook(server.uri(), WebhookKind::Slack)),
    };
    let client = init_webhook_client().expect("Failed to build client");

    assert!(send_alerts(&alerting_results(), &alerts, &client).await.is_empty());
}

/// (target, status, days) triples in rendered order.
fn slack_rows(body: &Value) -> Vec<(String, String, String)> {
    body["attachments"]
        .as_array()
        .expect("No attachments")
        .iter()
        .map(|a| {
            let field = |i: usize| a["fields"][i]["value"].as_str().unwrap_or_default().to_string();
            (field(0), field(1), field(2))
        })
        .collect()
}

fn teams_rows(body: &Value) -> Vec<(String, String, String)> {
    body["sections"]
        .as_array()
        .expect("No sections")
        .iter()
        .map(|s| {
            let fact = |i: usize| s["facts"][i]["value"].as_str().unwrap_or_default().to_string();
            (fact(0), fact(1), fact(2))
        })
        .collect()
}

#[test]
fn test_slack_and_teams_carry_same_hosts() {
    let mut results = alerting_results();
    results.push(result("gone.example.com", CertificateStatus::Critical, Some(-4)));
    let now = Utc::now();

    let slack = match build_payload(&results, ChannelKind::Webhook(WebhookKind::Slack), now) {
        Some(AlertPayload::Webhook { body, .. }) => body,
        other => panic!("unexpected slack payload: {other:?}"),
    };
    let teams = match build_payload(&results, ChannelKind::Webhook(WebhookKind::Teams), now) {
        Some(AlertPayload::Webhook { body, .. }) => body,
        other => panic!("unexpected teams payload: {other:?}"),
    };

    let rows = slack_rows(&slack);
    assert_eq!(rows, teams_rows(&teams));
    assert_eq!(
        rows,
        vec![
            ("gone.example.com:443".into(), "CRITICAL".into(), "-4".into()),
            ("down.example.com:443".into(), "ERROR".into(), "N/A".into()),
            ("soon.example.com:443".into(), "WARNING".into(), "21".into()),
        ]
    );
}

#[test]
fn test_unreachable_host_alert_carries_error_message() {
    let results = vec![result("down.example.com", CertificateStatus::Error, None)];
    let payload = build_payload(&results, ChannelKind::Email, Utc::now());

    let Some(AlertPayload::Email(content)) = payload else {
        panic!("expected an email payload");
    };
    assert!(content.text.contains("connection refused"));
    assert!(content.html.contains("connection refused"));
    assert!(!content.text.contains("Certificate expiring soon"));
}
