//! HTTP client wrapper for fetching article pages.

use std::time::Duration;

use reqwest::Client;

use crate::config::USER_AGENT;
use crate::error::{FetcherError, Result};

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::Client` with the given per-request timeout and a browser user agent.
pub fn create_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download a URL as text in a single attempt.
///
/// No retries: a transport error or a non-success status ends the attempt.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
///
/// # Returns
/// The response body decoded as text
pub async fn download_text(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        tracing::debug!(status = %status, url, "non-success response");
        return Err(FetcherError::AccessDenied {
            status: status.as_u16(),
        });
    }

    Ok(response.text().await?)
}
