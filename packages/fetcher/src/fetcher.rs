//! Text acquisition service: reader proxy first, direct fetch second.

use std::time::Duration;

use reqwest::Client;

use crate::config::{is_http_url, proxy_url, DEFAULT_PROXY_BASE_URL, HTTP_TIMEOUT_SECS};
use crate::error::{FetcherError, Result};
use crate::html::extract_article_text;
use crate::http::{create_client, download_text};

/// Fetches readable article text for a URL.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: Client,
    proxy_base_url: String,
}

impl Fetcher {
    /// Create a fetcher with the default proxy and timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
    }

    /// Create a fetcher with an explicit per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: create_client(timeout)?,
            proxy_base_url: DEFAULT_PROXY_BASE_URL.to_string(),
        })
    }

    /// Override the reader proxy base URL.
    pub fn with_proxy_base_url(mut self, proxy_base_url: impl Into<String>) -> Self {
        self.proxy_base_url = proxy_base_url.into();
        self
    }

    pub fn proxy_base_url(&self) -> &str {
        &self.proxy_base_url
    }

    /// Fetch article text, reporting why it failed.
    ///
    /// Input that is not an http(s) URL is returned unchanged, so callers can
    /// pass pasted text through the same path.
    pub async fn fetch_text(&self, input: &str) -> Result<String> {
        if !is_http_url(input) {
            return Ok(input.to_string());
        }
        let url = input.trim();

        match download_text(&self.http, &proxy_url(&self.proxy_base_url, url)).await {
            Ok(text) if !text.trim().is_empty() => {
                tracing::debug!(url, chars = text.len(), "fetched via reader proxy");
                return Ok(text);
            }
            Ok(_) => tracing::debug!(url, "reader proxy returned empty body"),
            Err(e) => tracing::debug!(url, error = %e, "reader proxy failed, fetching directly"),
        }

        let html = download_text(&self.http, url).await?;
        let text = extract_article_text(&html);
        if text.is_empty() {
            return Err(FetcherError::EmptyContent {
                url: url.to_string(),
            });
        }

        tracing::debug!(url, chars = text.len(), "fetched directly");
        Ok(text)
    }

    /// Best-effort variant of [`Fetcher::fetch_text`].
    ///
    /// Returns an empty string when every attempt failed.
    pub async fn acquire(&self, input: &str) -> String {
        match self.fetch_text(input).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(url = input, error = %e, "text acquisition failed");
                String::new()
            }
        }
    }
}
