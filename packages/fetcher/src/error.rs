//! Error types for text acquisition.

use thiserror::Error;

/// Main error type for the fetcher library.
#[derive(Debug, Error)]
pub enum FetcherError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The publisher answered, but not with a page we can read.
    #[error("Access denied by publisher (Status {status})")]
    AccessDenied { status: u16 },

    /// The page was fetched but contained no readable text.
    #[error("No readable text found at {url}")]
    EmptyContent { url: String },
}

/// Result type alias for fetcher operations.
pub type Result<T> = std::result::Result<T, FetcherError>;
