//! JSON webhook delivery shared by the Slack and Teams channels.

use anyhow::{bail, Context, Result};

/// POSTs `body` as JSON to `url`. Any non-2xx response is an error.
///
/// The request timeout comes from the client (see
/// [`init_webhook_client`](crate::initialization::init_webhook_client)).
pub(crate) async fn post_json(
    client: &reqwest::Client,
    url: &str,
    body: &serde_json::Value,
) -> Result<()> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .context("webhook request failed")?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        bail!("webhook returned status {}: {}", status, text);
    }

    Ok(())
}
