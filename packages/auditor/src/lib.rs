//! Logic Auditor - LLM logical audit with live reference data enrichment.
//!
//! An article (pasted text or a URL) is sent to a generative model that
//! returns its theses, reasoning flaws and numeric claims. Each claim is then
//! routed to a public statistics provider and compared with the latest
//! official figure.
//!
//! # Example
//!
//! ```
//! use logic_auditor::enrichment::compute_variance;
//! use logic_auditor::numeric::extract_number;
//!
//! assert_eq!(extract_number("Unemployment hit 5% in September"), Some(5.0));
//! assert_eq!(compute_variance("5%", "4.1").as_deref(), Some("+22.0%"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Environment configuration
//! - [`error`]: Error types and HTTP mapping
//! - [`models`]: Request and response types
//! - [`llm`]: Model client and prompts
//! - [`gateway`]: Reference data providers (FRED, EIA, World Bank, NOAA)
//! - [`router`]: Claim to provider routing rules
//! - [`numeric`]: Number extraction from free text
//! - [`enrichment`]: Concurrent claim verification and variance
//! - [`sanitizer`]: Tolerant decoding of model output
//! - [`auditor`]: The audit flow
//! - [`server`]: HTTP endpoints

pub mod auditor;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod gateway;
pub mod llm;
pub mod models;
pub mod numeric;
pub mod router;
pub mod sanitizer;
pub mod server;

pub use auditor::Auditor;
pub use error::{AuditError, Result};
pub use models::{AuditRequest, AuditResult, DataAnchor, LogicalFlaw};
