use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API error (status {status}): {message}")]
    LlmApiError { status: u16, message: String },

    #[error("LLM rate limited, retry after {retry_after_secs}s")]
    LlmRateLimited { retry_after_secs: u64 },

    #[error("failed to parse LLM response: {0}")]
    LlmResponseParse(String),

    #[error("LLM returned empty response")]
    LlmEmptyResponse,

    #[error("Audit logic error: {0}")]
    AuditLogic(String),

    #[error("AI failed to produce a JSON block.")]
    NoJsonBlock,

    #[error("AI returned malformed JSON: {reason} (near: {excerpt})")]
    JsonParse { reason: String, excerpt: String },
}

impl AuditError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuditError::InvalidInput(_)
            | AuditError::NoJsonBlock
            | AuditError::JsonParse { .. } => StatusCode::BAD_REQUEST,
            AuditError::AuditLogic(_)
            | AuditError::LlmApiError { .. }
            | AuditError::LlmRateLimited { .. }
            | AuditError::LlmResponseParse(_)
            | AuditError::LlmEmptyResponse => StatusCode::BAD_GATEWAY,
            AuditError::Config(_) | AuditError::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuditError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(status = status.as_u16(), error = %self, "audit request failed");
        let body = serde_json::json!({ "detail": self.to_string() });
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_json_block_message() {
        assert_eq!(
            AuditError::NoJsonBlock.to_string(),
            "AI failed to produce a JSON block."
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuditError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuditError::AuditLogic("timeout".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AuditError::Config("missing".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
