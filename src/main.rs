//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `cert_expiry` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Console output and exit status
//! - Ctrl-C interruption
//!
//! All core functionality is implemented in the library crate.

use std::process;

use clap::Parser;
use log::{error, info, warn};

use cert_expiry::app::print_report;
use cert_expiry::config::{load_config, EXIT_ERROR, EXIT_INTERRUPTED};
use cert_expiry::initialization::{init_crypto_provider, init_logger_with, init_webhook_client};
use cert_expiry::{run_check, send_alerts, ConfigError, Opt};

#[tokio::main]
async fn main() {
    let opt = Opt::parse();

    if let Err(e) = init_logger_with(opt.log_level.clone().into(), opt.log_format.clone()) {
        eprintln!("cert_expiry error: failed to initialize logger: {e}");
        process::exit(EXIT_ERROR);
    }

    // Initialize crypto provider for the SMTP and webhook TLS clients
    init_crypto_provider();

    let code = tokio::select! {
        code = run(&opt) => code,
        () = interrupted() => {
            info!("Interrupted by user");
            EXIT_INTERRUPTED
        }
    };

    log::logger().flush();
    process::exit(code);
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

async fn run(opt: &Opt) -> i32 {
    let config = match load_config(&opt.config) {
        Ok(config) => config,
        Err(ConfigError::NotFound(path)) => {
            error!("Configuration file not found: {}", path.display());
            eprintln!("Error: Configuration file '{}' not found.", path.display());
            eprintln!("Please create a configuration file with the list of websites to check.");
            return EXIT_ERROR;
        }
        Err(e) => {
            error!("{e}");
            eprintln!("cert_expiry error: {e}");
            return EXIT_ERROR;
        }
    };

    let report = match run_check(&config).await {
        Ok(report) => report,
        Err(e) => {
            error!("{e:#}");
            eprintln!("cert_expiry error: {e:#}");
            return EXIT_ERROR;
        }
    };

    if !opt.quiet {
        print_report(&report);
    }

    // Delivery failures are logged and never change the exit code
    match init_webhook_client() {
        Ok(client) => {
            send_alerts(&report.results, &config.alerts, &client).await;
        }
        Err(e) => error!("Failed to initialize alert client, no alerts sent: {e}"),
    }

    report.exit_code()
}
