use serde::{Deserialize, Serialize};

/// Sentinel for a claim no reference source has confirmed.
pub const UNVERIFIED: &str = "Unverified";

/// Sentinel for a variance that could not be computed.
pub const NOT_APPLICABLE: &str = "N/A";

/// Marker for a reference period whose figure has not been published yet.
pub const DATA_PENDING: &str = "Data pending (reporting lag)";

/// Request body for `POST /api/audit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_domain")]
    pub domain: String,
}

fn default_domain() -> String {
    "Economics".to_string()
}

impl AuditRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            url: None,
            domain: default_domain(),
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            text: None,
            url: Some(url.into()),
            domain: default_domain(),
        }
    }
}

/// One reasoning flaw the model found in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalFlaw {
    pub flaw_type: String,
    pub lawyers_note: String,
    pub quote: String,
    pub severity: String,
}

/// A factual claim flagged for numeric verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataAnchor {
    pub claim: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub source: String,
    pub official_value: String,
    pub variance: String,
}

impl DataAnchor {
    /// A fresh, unenriched claim.
    pub fn new(claim: impl Into<String>) -> Self {
        Self {
            claim: claim.into(),
            category: None,
            source: String::new(),
            official_value: UNVERIFIED.to_string(),
            variance: NOT_APPLICABLE.to_string(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// The full audit payload returned to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    pub theses: Vec<String>,
    pub logical_flaws: Vec<LogicalFlaw>,
    pub data_anchors: Vec<DataAnchor>,
    pub unresolved_conflicts: Vec<String>,
    pub next_steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}
