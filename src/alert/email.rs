//! Email alert channel using lettre.
//!
//! The message is a `multipart/alternative` with a plain-text part and an HTML
//! table. SMTP delivery is blocking, so it runs on Tokio's blocking pool.

use anyhow::{anyhow, Context, Result};
use lettre::message::{header, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::debug;

use crate::alert::payload::{AlertSummary, EmailContent};
use crate::config::{EmailConfig, ALERT_FOOTER, SMTP_TIMEOUT};
use crate::models::CertificateStatus;

/// Renders both email bodies for a summary.
pub fn render(summary: &AlertSummary) -> EmailContent {
    EmailContent {
        text: format_text_body(summary),
        html: format_html_body(summary),
    }
}

fn status_color(status: CertificateStatus) -> &'static str {
    match status {
        CertificateStatus::Critical => "#ff0000",
        CertificateStatus::Warning => "#ff9900",
        CertificateStatus::Error => "#cc0000",
        CertificateStatus::Ok => "#000000",
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats the summary as an HTML table, one row per host.
pub fn format_html_body(summary: &AlertSummary) -> String {
    let rows: String = summary
        .entries
        .iter()
        .map(|entry| {
            format!(
                r#"
        <tr>
            <td>{}</td>
            <td style="color: {}; font-weight: bold;">{}</td>
            <td>{}</td>
            <td>{}</td>
            <td>{}</td>
        </tr>"#,
                escape_html(&entry.target),
                status_color(entry.status),
                entry.status.as_str(),
                entry.days_label(),
                entry.expiry_label(),
                escape_html(entry.details())
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #333;">
    <h2>SSL Certificate Alert</h2>
    <p>The following certificates require attention:</p>
    <table border="1" cellpadding="5" cellspacing="0">
        <tr>
            <th>Website</th>
            <th>Status</th>
            <th>Days Until Expiry</th>
            <th>Expiry Date</th>
            <th>Details</th>
        </tr>{}
    </table>
    <p style="color: #666; font-size: 12px;">Generated by {} at {}</p>
</body>
</html>"#,
        rows,
        ALERT_FOOTER,
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Formats the summary as plain text.
pub fn format_text_body(summary: &AlertSummary) -> String {
    let mut body = String::from("SSL Certificate Alert\n\n");

    for entry in &summary.entries {
        body.push_str(&format!("• {} - {}\n", entry.target, entry.status));
        if let Some(days) = entry.days_until_expiry {
            body.push_str(&format!("  Days until expiry: {days}\n"));
            body.push_str(&format!("  Expiry date: {}\n", entry.expiry_label()));
        }
        match &entry.error {
            Some(error) => body.push_str(&format!("  Error: {error}\n")),
            None => body.push_str(&format!("  Details: {}\n", entry.details())),
        }
    }

    body.push_str(&format!(
        "\n---\nGenerated by {} at {}",
        ALERT_FOOTER,
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    body
}

/// Builds the MIME message for the configured sender and recipients.
///
/// # Errors
///
/// Returns an error if an address does not parse or the message cannot be assembled.
pub fn build_message(config: &EmailConfig, content: &EmailContent) -> Result<Message> {
    let from: Mailbox = config
        .from
        .parse()
        .with_context(|| format!("invalid sender address {:?}", config.from))?;

    let mut builder = Message::builder().from(from).subject(config.subject.as_str());
    for to in &config.to {
        let mailbox: Mailbox = to
            .parse()
            .with_context(|| format!("invalid recipient address {to:?}"))?;
        builder = builder.to(mailbox);
    }

    let message = builder.multipart(
        MultiPart::alternative()
            .singlepart(
                SinglePart::builder()
                    .header(header::ContentType::TEXT_PLAIN)
                    .body(content.text.clone()),
            )
            .singlepart(
                SinglePart::builder()
                    .header(header::ContentType::TEXT_HTML)
                    .body(content.html.clone()),
            ),
    )?;

    Ok(message)
}

fn transport(config: &EmailConfig) -> Result<SmtpTransport> {
    let builder = if config.use_tls {
        SmtpTransport::starttls_relay(&config.smtp_server)?
    } else {
        SmtpTransport::builder_dangerous(&config.smtp_server)
    };

    let mut builder = builder.port(config.smtp_port).timeout(Some(SMTP_TIMEOUT));
    if let Some((username, password)) = config.credentials() {
        builder = builder.credentials(Credentials::new(username.to_string(), password.to_string()));
    }

    Ok(builder.build())
}

/// Sends the rendered content to every configured recipient.
///
/// # Errors
///
/// Returns an error if the message cannot be built or the SMTP exchange fails.
pub async fn send_email(config: &EmailConfig, content: &EmailContent) -> Result<()> {
    let message = build_message(config, content)?;
    let transport = transport(config)?;
    debug!(
        "Sending email alert via {}:{} to {} recipient(s)",
        config.smtp_server,
        config.smtp_port,
        config.to.len()
    );

    tokio::task::spawn_blocking(move || {
        transport
            .send(&message)
            .map(|_| ())
            .map_err(|e| anyhow!("Failed to send email: {}", e))
    })
    .await??;

    Ok(())
}
