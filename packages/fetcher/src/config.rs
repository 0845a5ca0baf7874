//! Configuration constants and URL helpers for text acquisition.

use regex::Regex;
use std::sync::LazyLock;

/// Base URL of the reader proxy that renders pages to clean text.
pub const DEFAULT_PROXY_BASE_URL: &str = "https://r.jina.ai";

/// HTTP timeout in seconds.
///
/// Applies to each request separately; the proxy attempt and the direct
/// attempt each get the full budget.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Browser-like user agent. Several publishers reject unknown agents outright.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Anything that starts with an http(s) scheme is treated as a fetchable URL.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HTTP_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid regex"));

/// Check whether the input looks like a fetchable URL.
///
/// # Examples
/// ```
/// use logic_auditor_fetcher::config::is_http_url;
///
/// assert!(is_http_url("https://example.com/article"));
/// assert!(is_http_url("  HTTP://example.com"));
/// assert!(!is_http_url("Inflation rose to 3% last year."));
/// ```
pub fn is_http_url(input: &str) -> bool {
    HTTP_URL_PATTERN.is_match(input.trim())
}

/// Build the reader-proxy URL for a target page.
///
/// The proxy takes the full target URL as its path, scheme included.
pub fn proxy_url(proxy_base_url: &str, target: &str) -> String {
    format!("{}/{}", proxy_base_url.trim_end_matches('/'), target.trim())
}
