//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::WEBHOOK_TIMEOUT;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used for webhook alerts.
///
/// Creates a `reqwest::Client` configured with:
/// - A request timeout of [`WEBHOOK_TIMEOUT`]
/// - A connect timeout of half that, so DNS/TCP stalls fail early
/// - A `cert_expiry/<version>` User-Agent
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_webhook_client() -> Result<reqwest::Client, InitializationError> {
    init_webhook_client_with_timeout(WEBHOOK_TIMEOUT)
}

pub fn init_webhook_client_with_timeout(
    timeout: Duration,
) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(timeout / 2)
        .user_agent(concat!("cert_expiry/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
