//! HTTP surface: `POST /api/audit` and `GET /api/health`.

mod handlers;
mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::gateway::ReferenceSource;
use crate::llm::LlmClient;

pub use state::AppState;

/// Build the application router.
///
/// CORS is fully permissive; the browser frontend is served from another origin.
pub fn router<C, S>(state: AppState<C, S>) -> Router
where
    C: LlmClient + 'static,
    S: ReferenceSource + 'static,
{
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/audit", post(handlers::audit::<C, S>))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for SIGINT");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auditor::{Auditor, MISSING_INPUT};
    use crate::config::LlmConfig;
    use crate::gateway::test_support::MockReferenceSource;
    use crate::llm::MockLlmClient;
    use crate::router::UNEMPLOYMENT;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use logic_auditor_fetcher::Fetcher;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn state(
        llm: MockLlmClient,
        gateway: MockReferenceSource,
    ) -> AppState<MockLlmClient, MockReferenceSource> {
        let config = LlmConfig::builder("test-key").build();
        let fetcher = Fetcher::new().expect("fetcher");
        AppState::new(Auditor::new(llm, gateway, fetcher, &config))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/audit")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(state(
            MockLlmClient::with_response("{}"),
            MockReferenceSource::new(),
        ));
        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_audit_round_trip() {
        let llm = MockLlmClient::with_response(
            r#"{
                "theses": ["T"],
                "data_anchors": [{"claim": "Unemployment is 5%", "category": "unemployment"}]
            }"#,
        );
        let gateway =
            MockReferenceSource::new().with_point(UNEMPLOYMENT, Some("4.1"), "2024-09", "FRED");
        let app = router(state(llm, gateway));

        let response = app
            .oneshot(post_json(
                r#"{"text": "Unemployment is 5% according to the article."}"#,
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["theses"], json!(["T"]));
        assert_eq!(body["data_anchors"][0]["official_value"], "4.1");
        assert_eq!(body["data_anchors"][0]["source"], "FRED (2024-09)");
        assert_eq!(body["data_anchors"][0]["variance"], "+22.0%");
        assert_eq!(body["logical_flaws"], json!([]));
        assert_eq!(body["unresolved_conflicts"], json!([]));
        assert_eq!(body["next_steps"], json!([]));
    }

    #[tokio::test]
    async fn test_missing_input_is_bad_request() {
        let state = state(MockLlmClient::with_response("{}"), MockReferenceSource::new());
        let app = router(state.clone());

        let response = app
            .oneshot(post_json(r#"{"domain": "Economics"}"#))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"detail": MISSING_INPUT}));
        assert_eq!(state.auditor.llm().calls(), 0);
    }

    #[tokio::test]
    async fn test_model_failure_is_bad_gateway() {
        let llm = MockLlmClient::with_error(crate::error::AuditError::LlmEmptyResponse);
        let app = router(state(llm, MockReferenceSource::new()));

        let response = app
            .oneshot(post_json(r#"{"text": "A long enough article body to audit."}"#))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert!(body["detail"]
            .as_str()
            .is_some_and(|d| d.starts_with("Audit logic error: ")));
    }

    #[tokio::test]
    async fn test_unreadable_body_uses_detail_shape() {
        let app = router(state(
            MockLlmClient::with_response("{}"),
            MockReferenceSource::new(),
        ));

        let response = app.oneshot(post_json("not json")).await.expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["detail"].is_string());
    }

    #[tokio::test]
    async fn test_cors_preflight_allowed() {
        let app = router(state(
            MockLlmClient::with_response("{}"),
            MockReferenceSource::new(),
        ));

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/audit")
                    .header("origin", "http://localhost:3000")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}
