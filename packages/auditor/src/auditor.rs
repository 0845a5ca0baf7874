use logic_auditor_fetcher::Fetcher;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::LlmConfig;
use crate::enrichment::{anchor_slots, enrich, AnchorSlot};
use crate::error::{AuditError, Result};
use crate::gateway::ReferenceSource;
use crate::llm::{prompt, LlmClient, LlmRequest, Message, Role};
use crate::models::{AuditRequest, AuditResult};
use crate::sanitizer::sanitize;

/// Pasted text must be longer than this (after trimming) to win over a URL.
pub const MIN_TEXT_CHARS: usize = 10;

/// Resolved content shorter than this (after trimming) is rejected.
pub const MIN_CONTENT_CHARS: usize = 10;

/// Longest slice of model output quoted in a parse error.
const EXCERPT_CHARS: usize = 200;

pub const MISSING_INPUT: &str =
    "Validation Error: Please paste article text or provide a valid URL.";
pub const CONTENT_TOO_SHORT: &str =
    "Content Error: The provided text or scraped content is too short to audit.";

/// Audit orchestrator.
///
/// Holds the model client, the reference data gateway and the text fetcher,
/// all constructed once at startup. Requests share it behind an `Arc`; it
/// keeps no per-request state.
pub struct Auditor<C: LlmClient, S: ReferenceSource> {
    llm: C,
    gateway: S,
    fetcher: Fetcher,
    max_tokens: u32,
    temperature: f64,
}

impl<C: LlmClient, S: ReferenceSource> Auditor<C, S> {
    pub fn new(llm: C, gateway: S, fetcher: Fetcher, config: &LlmConfig) -> Self {
        Self {
            llm,
            gateway,
            fetcher,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    pub fn llm(&self) -> &C {
        &self.llm
    }

    pub fn gateway(&self) -> &S {
        &self.gateway
    }

    /// Resolve the request's input, then audit it.
    ///
    /// Input errors are raised before the model is ever called.
    pub async fn handle(&self, request: AuditRequest) -> Result<AuditResult> {
        let content = self.resolve_input(&request).await?;
        self.audit(&content, &request.domain).await
    }

    /// Run one audit over `text`.
    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn audit(&self, text: &str, domain: &str) -> Result<AuditResult> {
        let request = LlmRequest {
            system: prompt::build_system_prompt().to_string(),
            messages: vec![Message {
                role: Role::User,
                content: prompt::build_audit_prompt(domain, text),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .llm
            .complete(&request)
            .await
            .map_err(|e| AuditError::AuditLogic(e.to_string()))?;

        debug!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "model answered"
        );

        let mut raw = parse_model_output(&response.content)?;

        let mut slots = match raw.as_object_mut() {
            Some(map) => anchor_slots(map.remove("data_anchors")),
            None => Vec::new(),
        };
        enrich(&mut slots, &self.gateway).await;

        let mut result = sanitize(&raw);
        result.data_anchors = slots
            .into_iter()
            .filter_map(AnchorSlot::into_anchor)
            .collect();

        info!(
            theses = result.theses.len(),
            flaws = result.logical_flaws.len(),
            claims = result.data_anchors.len(),
            "audit complete"
        );
        Ok(result)
    }

    /// Pasted text wins when it is long enough; otherwise the URL is fetched.
    async fn resolve_input(&self, request: &AuditRequest) -> Result<String> {
        let text = request.text.as_deref().map(str::trim).unwrap_or_default();
        let url = request
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());

        let content = if text.chars().count() > MIN_TEXT_CHARS {
            text.to_string()
        } else if let Some(url) = url {
            info!(url, "fetching article text");
            self.fetcher.acquire(url).await
        } else {
            return Err(AuditError::InvalidInput(MISSING_INPUT.to_string()));
        };

        let content = content.trim();
        if content.chars().count() < MIN_CONTENT_CHARS {
            return Err(AuditError::InvalidInput(CONTENT_TOO_SHORT.to_string()));
        }
        Ok(content.to_string())
    }
}

/// The widest `{` ... `}` span in the model's answer, if any.
pub fn extract_json_block(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

fn parse_model_output(content: &str) -> Result<Value> {
    let block = extract_json_block(content).ok_or(AuditError::NoJsonBlock)?;
    serde_json::from_str(block).map_err(|e| AuditError::JsonParse {
        reason: e.to_string(),
        excerpt: block.chars().take(EXCERPT_CHARS).collect(),
    })
}
