//! Human-readable console report.

use chrono::Local;
use colored::*;

use crate::models::{CertificateStatus, CheckResult};
use crate::CheckReport;

const RULE_WIDTH: usize = 80;

fn status_symbol(status: CertificateStatus) -> &'static str {
    match status {
        CertificateStatus::Ok => "✓",
        CertificateStatus::Warning => "⚠",
        CertificateStatus::Critical | CertificateStatus::Error => "✗",
    }
}

fn colored_status(status: CertificateStatus) -> ColoredString {
    match status {
        CertificateStatus::Ok => status.as_str().green(),
        CertificateStatus::Warning => status.as_str().yellow(),
        CertificateStatus::Critical => status.as_str().red().bold(),
        CertificateStatus::Error => status.as_str().red(),
    }
}

fn render_host(out: &mut String, result: &CheckResult) {
    out.push_str(&format!("\nWebsite: {}\n", result.host));
    out.push_str(&format!("Status: {}\n", colored_status(result.status)));

    if let Some(error) = result.error_message() {
        out.push_str(&format!("Error: {error}\n"));
        return;
    }

    if let (Some(expiry), Some(days)) = (result.expiry(), result.days_until_expiry) {
        out.push_str(&format!(
            "Certificate Expiry Date: {}\n",
            expiry.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out.push_str(&format!(
            "Days Until Expiry: {} days {}\n",
            days,
            status_symbol(result.status)
        ));
        if result.is_expired() {
            out.push_str(&format!("{}\n", "⚠️  CERTIFICATE HAS EXPIRED!".red().bold()));
        }
    }
}

/// Renders the report as printed to stdout. Hosts are listed by `hostname:port`.
pub fn render_report(report: &CheckReport) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    let mut out = format!(
        "\n{heavy}\n{}\n{heavy}\n",
        "SSL/TLS CERTIFICATE EXPIRY CHECK RESULTS".bold()
    );
    out.push_str(&format!(
        "Scan completed at: {}\n{light}\n",
        report
            .checked_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    ));

    let mut results: Vec<&CheckResult> = report.results.iter().collect();
    results.sort_by_key(|r| (r.host.hostname.clone(), r.host.port));
    for result in results {
        render_host(&mut out, result);
    }

    out.push_str(&format!("\n{heavy}\n"));
    out.push_str(&format!(
        "Checked {} host{} in {:.1}s: {} OK, {} WARNING, {} CRITICAL, {} ERROR\n",
        report.results.len(),
        if report.results.len() == 1 { "" } else { "s" },
        report.elapsed_seconds,
        report.count(CertificateStatus::Ok),
        report.count(CertificateStatus::Warning),
        report.count(CertificateStatus::Critical),
        report.count(CertificateStatus::Error)
    ));
    out
}

/// Prints the report to stdout.
pub fn print_report(report: &CheckReport) {
    print!("{}", render_report(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FetchErrorKind, FetchOutcome, HostTarget};
    use chrono::{Duration, TimeZone, Utc};

    fn report() -> CheckReport {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        CheckReport {
            results: vec![
                CheckResult {
                    host: HostTarget::new("zeta.example.com", 443),
                    outcome: FetchOutcome::Success {
                        expiry: now + Duration::days(90),
                    },
                    days_until_expiry: Some(90),
                    status: CertificateStatus::Ok,
                },
                CheckResult {
                    host: HostTarget::new("alpha.example.com", 8443),
                    outcome: FetchOutcome::Success {
                        expiry: now - Duration::days(2),
                    },
                    days_until_expiry: Some(-2),
                    status: CertificateStatus::Critical,
                },
                CheckResult {
                    host: HostTarget::new("down.example.com", 443),
                    outcome: FetchOutcome::failure(
                        FetchErrorKind::Dns,
                        "DNS resolution failed for down.example.com: no record found",
                    ),
                    days_until_expiry: None,
                    status: CertificateStatus::Error,
                },
            ],
            checked_at: now,
            elapsed_seconds: 1.5,
        }
    }

    #[test]
    fn test_render_report_contents() {
        colored::control::set_override(false);
        let text = render_report(&report());

        assert!(text.contains("SSL/TLS CERTIFICATE EXPIRY CHECK RESULTS"));
        assert!(text.contains("Website: alpha.example.com:8443"));
        assert!(text.contains("Days Until Expiry: 90 days ✓"));
        assert!(text.contains("Days Until Expiry: -2 days ✗"));
        assert!(text.contains("CERTIFICATE HAS EXPIRED!"));
        assert!(text.contains("Error: DNS resolution failed for down.example.com"));
        assert!(text.contains("Checked 3 hosts in 1.5s: 1 OK, 0 WARNING, 1 CRITICAL, 1 ERROR"));
    }

    #[test]
    fn test_render_report_sorted_by_host() {
        colored::control::set_override(false);
        let text = render_report(&report());
        let alpha = text.find("alpha.example.com").unwrap();
        let down = text.find("down.example.com").unwrap();
        let zeta = text.find("zeta.example.com").unwrap();
        assert!(alpha < down && down < zeta);
    }
}
