//! Logic Auditor Fetcher - Acquire readable article text from a URL.
//!
//! The fetch chain tries a reader proxy that renders the page to clean text
//! first, then falls back to downloading the page directly and extracting its
//! paragraph text.
//!
//! # Example
//!
//! ```
//! use logic_auditor_fetcher::config;
//!
//! assert!(config::is_http_url("https://example.com/article"));
//! assert_eq!(
//!     config::proxy_url("https://r.jina.ai", "https://example.com"),
//!     "https://r.jina.ai/https://example.com"
//! );
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and URL helpers
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client construction and single-attempt download
//! - [`html`]: Paragraph text extraction
//! - [`fetcher`]: The proxy-then-direct fetch chain
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod html;
pub mod http;

pub use error::{FetcherError, Result};
pub use fetcher::Fetcher;
pub use html::extract_article_text;
