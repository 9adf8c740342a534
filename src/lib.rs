//! cert_expiry library: TLS certificate expiry checking and alerting
//!
//! This library connects to a list of TLS endpoints, reads the expiry date of
//! the certificate each one presents, classifies it against warning and
//! critical thresholds, and delivers alerts by email, Slack or Microsoft Teams.
//!
//! # Example
//!
//! ```no_run
//! use cert_expiry::config::load_config;
//! use cert_expiry::run_check;
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(Path::new("config.yaml"))?;
//! let report = run_check(&config).await?;
//! println!("Checked {} hosts, exit code {}", report.results.len(), report.exit_code());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod alert;
pub mod app;
pub mod classify;
pub mod config;
pub mod dispatch;
mod error_handling;
pub mod initialization;
pub mod models;
pub mod tls;

// Re-export public API
pub use alert::{send_alerts, ChannelReport, SendOutcome};
pub use config::{CheckerConfig, LogFormat, LogLevel, Opt};
pub use error_handling::{CheckStats, ConfigError, FetchError, InitializationError};
pub use models::{CertificateStatus, CheckResult, FetchErrorKind, FetchOutcome, HostTarget};
pub use run::{run_check, CheckReport};

// Internal run module (contains the main checking logic)
mod run {
    use std::sync::Arc;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use chrono::{DateTime, Utc};
    use log::info;

    use crate::app::exit_code;
    use crate::classify::check_result;
    use crate::config::CheckerConfig;
    use crate::dispatch::run_all;
    use crate::error_handling::CheckStats;
    use crate::initialization::init_resolver;
    use crate::models::{CertificateStatus, CheckResult};
    use crate::tls::CertificateFetcher;

    /// Results of a certificate check run.
    #[derive(Debug, Clone)]
    pub struct CheckReport {
        /// One result per configured host, in completion order
        pub results: Vec<CheckResult>,
        /// Instant used to compute every host's day count
        pub checked_at: DateTime<Utc>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl CheckReport {
        /// Number of hosts with the given status.
        pub fn count(&self, status: CertificateStatus) -> usize {
            self.results.iter().filter(|r| r.status == status).count()
        }

        /// Process exit code for this run (see [`crate::app::exit_code`]).
        pub fn exit_code(&self) -> i32 {
            exit_code(&self.results)
        }
    }

    /// Checks every configured host and classifies the results.
    ///
    /// Per-host failures are returned as ERROR results, not as `Err`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the shared TLS configuration cannot be built.
    pub async fn run_check(config: &CheckerConfig) -> Result<CheckReport> {
        let start = Instant::now();
        let hosts = config.hosts();
        info!(
            "Checking {} host{} with up to {} concurrent connections",
            hosts.len(),
            if hosts.len() == 1 { "" } else { "s" },
            config.max_workers
        );

        let resolver = init_resolver(config.timeout());
        let fetcher = CertificateFetcher::new(resolver, config.timeout())
            .context("Failed to initialize TLS client configuration")?;

        let outcomes = run_all(hosts, config.max_workers, Arc::new(fetcher)).await;

        let checked_at = Utc::now();
        let thresholds = config.thresholds();
        let stats = CheckStats::new();
        let results: Vec<CheckResult> = outcomes
            .into_iter()
            .map(|(host, outcome)| {
                let result = check_result(host, outcome, &thresholds, checked_at);
                stats.record(&result);
                result
            })
            .collect();
        stats.log_summary();

        let elapsed_seconds = start.elapsed().as_secs_f64();
        info!("Finished checking {} hosts in {:.2}s", results.len(), elapsed_seconds);

        Ok(CheckReport {
            results,
            checked_at,
            elapsed_seconds,
        })
    }
}
