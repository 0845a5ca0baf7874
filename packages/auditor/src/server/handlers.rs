use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::{AuditError, Result};
use crate::gateway::ReferenceSource;
use crate::llm::LlmClient;
use crate::models::{AuditRequest, AuditResult};
use crate::server::state::AppState;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /api/audit`
pub async fn audit<C, S>(
    State(state): State<AppState<C, S>>,
    payload: std::result::Result<Json<AuditRequest>, JsonRejection>,
) -> Result<Json<AuditResult>>
where
    C: LlmClient + 'static,
    S: ReferenceSource + 'static,
{
    // Unreadable bodies get the same `{"detail": ...}` shape as every other failure.
    let Json(request) =
        payload.map_err(|rejection| AuditError::InvalidInput(rejection.body_text()))?;

    tracing::info!(
        domain = %request.domain,
        has_text = request.text.is_some(),
        has_url = request.url.is_some(),
        "audit requested"
    );

    let result = state.auditor.handle(request).await?;
    Ok(Json(result))
}
