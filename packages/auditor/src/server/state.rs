use std::sync::Arc;

use crate::auditor::Auditor;
use crate::gateway::ReferenceSource;
use crate::llm::LlmClient;

/// Shared, immutable handler state.
pub struct AppState<C: LlmClient, S: ReferenceSource> {
    pub auditor: Arc<Auditor<C, S>>,
}

impl<C: LlmClient, S: ReferenceSource> AppState<C, S> {
    pub fn new(auditor: Auditor<C, S>) -> Self {
        Self {
            auditor: Arc::new(auditor),
        }
    }
}

// Manual impl: a derive would demand `C: Clone` and `S: Clone`.
impl<C: LlmClient, S: ReferenceSource> Clone for AppState<C, S> {
    fn clone(&self) -> Self {
        Self {
            auditor: Arc::clone(&self.auditor),
        }
    }
}
