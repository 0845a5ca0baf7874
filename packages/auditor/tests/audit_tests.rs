//! End-to-end audits against mocked model, provider and web servers.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use logic_auditor::auditor::CONTENT_TOO_SHORT;
use logic_auditor::config::{GatewayConfig, LlmConfig};
use logic_auditor::gateway::HttpGateway;
use logic_auditor::llm::AnthropicClient;
use logic_auditor::models::{NOT_APPLICABLE, UNVERIFIED};
use logic_auditor::{AuditError, AuditRequest, Auditor};
use logic_auditor_fetcher::Fetcher;

const ARTICLE: &str = "Unemployment climbed to 5% in September while world GDP grew 3%.";

fn model_reply(audit: Value) -> ResponseTemplate {
    let text = format!("Here is my audit.\n```json\n{audit}\n```");
    ResponseTemplate::new(200).set_body_json(json!({
        "content": [{"type": "text", "text": text}],
        "usage": {"input_tokens": 120, "output_tokens": 340}
    }))
}

fn auditor_for(server: &MockServer) -> Auditor<AnthropicClient, HttpGateway> {
    let llm_config = LlmConfig::builder("test-key")
        .api_base_url(server.uri())
        .timeout_secs(5)
        .build();
    let gateway_config = GatewayConfig::builder()
        .fred_api_key("fred-key")
        .eia_api_key("eia-key")
        .base_url(server.uri())
        .timeout_secs(2)
        .build();
    let fetcher = Fetcher::new()
        .expect("fetcher")
        .with_proxy_base_url(format!("{}/proxy", server.uri()));

    Auditor::new(
        AnthropicClient::new(&llm_config).expect("llm client"),
        HttpGateway::new(&gateway_config).expect("gateway"),
        fetcher,
        &llm_config,
    )
}

async fn mount_model(server: &MockServer, audit: Value) {
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(model_reply(audit))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_audit_enriches_from_fred_and_world_bank() {
    let server = MockServer::start().await;

    mount_model(
        &server,
        json!({
            "theses": ["The labour market is deteriorating"],
            "logical_flaws": [{
                "flaw_type": "Causal Flaw",
                "lawyers_note": "Correlation presented as cause",
                "quote": "because of",
                "severity": "High"
            }],
            "data_anchors": [
                {"claim": "Unemployment climbed to 5%", "category": "unemployment"},
                {"claim": "World GDP grew 3%", "category": "gdp_growth"},
                {"claim": "Survey of 40 economists"}
            ],
            "unresolved_conflicts": [{"claim": "Timing of the rise", "note": "Month unclear"}],
            "next_steps": ["Compare with BLS table A-1"]
        }),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/fred/series/observations"))
        .and(query_param("series_id", "UNRATE"))
        .and(query_param("api_key", "fred-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "observations": [{"date": "2024-09-01", "value": "4.1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/country/WLD/indicator/NY.GDP.MKTP.KD.ZG"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"page": 1, "pages": 1, "per_page": 50, "total": 1},
            [{"date": "2023", "value": 2.7123}]
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let auditor = auditor_for(&server);
    let result = auditor
        .handle(AuditRequest::from_text(ARTICLE))
        .await
        .expect("audit");

    assert_eq!(result.theses, vec!["The labour market is deteriorating"]);
    assert_eq!(result.logical_flaws[0].severity, "High");
    assert_eq!(
        result.unresolved_conflicts,
        vec!["Timing of the rise: Month unclear"]
    );

    let unemployment = &result.data_anchors[0];
    assert_eq!(unemployment.official_value, "4.1");
    assert_eq!(unemployment.source, "FRED (2024-09-01)");
    assert_eq!(unemployment.variance, "+22.0%");

    let gdp = &result.data_anchors[1];
    assert_eq!(gdp.official_value, "2.71%");
    assert_eq!(gdp.source, "World Bank (2023)");
    assert_eq!(gdp.variance, "+10.7%");

    let survey = &result.data_anchors[2];
    assert_eq!(survey.official_value, UNVERIFIED);
    assert_eq!(survey.variance, NOT_APPLICABLE);
}

#[tokio::test]
async fn test_audit_enriches_from_eia_noaa_and_fred_inflation() {
    let server = MockServer::start().await;

    mount_model(
        &server,
        json!({
            "theses": ["Prices and temperatures are both rising"],
            "data_anchors": [
                {"claim": "Crude oil sits at $70 a barrel", "category": "energy"},
                {"claim": "Global temperature is 1.5C above baseline", "category": "climate"},
                {"claim": "Inflation is 3%", "category": "inflation"}
            ]
        }),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/v2/petroleum/pri/spt/data/"))
        .and(query_param("api_key", "eia-key"))
        .and(query_param("frequency", "daily"))
        .and(query_param("data[0]", "value"))
        .and(query_param("facets[series][]", "RWTC"))
        .and(query_param("sort[0][column]", "period"))
        .and(query_param("sort[0][direction]", "desc"))
        .and(query_param("length", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "data": [{"period": "2024-09-30", "series": "RWTC", "value": 68.25}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(concat!(
            r"^/access/monitoring/climate-at-a-glance/global/time-series",
            r"/globe/land_ocean/12/12/1850-\d{4}/data\.json$",
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"2023": {"anomaly": 1.18}, "2024": {"anomaly": 1.29}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fred/series/observations"))
        .and(query_param("series_id", "CPIAUCSL"))
        .and(query_param("units", "pc1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "observations": [{"date": "2024-09-01", "value": "2.4"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = auditor_for(&server)
        .audit(ARTICLE, "Economics")
        .await
        .expect("audit");

    let oil = &result.data_anchors[0];
    assert_eq!(oil.official_value, "68.25");
    assert_eq!(oil.source, "EIA (2024-09-30)");
    assert_eq!(oil.variance, "+2.6%");

    let temperature = &result.data_anchors[1];
    assert_eq!(temperature.official_value, "1.29");
    assert_eq!(temperature.source, "NOAA NCEI (2024)");
    assert_eq!(temperature.variance, "+16.3%");

    let inflation = &result.data_anchors[2];
    assert_eq!(inflation.official_value, "2.4");
    assert_eq!(inflation.source, "FRED (2024-09-01)");
    assert_eq!(inflation.variance, "+25.0%");
}

#[tokio::test]
async fn test_provider_failure_leaves_claim_unverified() {
    let server = MockServer::start().await;

    mount_model(
        &server,
        json!({
            "theses": [],
            "data_anchors": [{"claim": "Inflation is running at 6%", "category": "inflation"}]
        }),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/fred/series/observations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = auditor_for(&server)
        .audit(ARTICLE, "Economics")
        .await
        .expect("audit still succeeds");

    assert_eq!(result.data_anchors[0].official_value, UNVERIFIED);
    assert_eq!(result.data_anchors[0].variance, NOT_APPLICABLE);
}

#[tokio::test]
async fn test_url_input_is_fetched_through_proxy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/proxy/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE))
        .expect(1)
        .mount(&server)
        .await;

    mount_model(&server, json!({"theses": ["Fetched and audited"]})).await;

    let url = format!("{}/news/labour-market", server.uri());
    let result = auditor_for(&server)
        .handle(AuditRequest::from_url(url))
        .await
        .expect("audit");

    assert_eq!(result.theses, vec!["Fetched and audited"]);
}

#[tokio::test]
async fn test_unreachable_url_is_content_error_without_model_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/proxy/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/paywalled"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(model_reply(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let url = format!("{}/paywalled", server.uri());
    let err = auditor_for(&server)
        .handle(AuditRequest::from_url(url))
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::InvalidInput(_)));
    assert_eq!(err.to_string(), CONTENT_TOO_SHORT);
}

#[tokio::test]
async fn test_model_api_error_is_audit_logic_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_json(json!({
            "type": "error",
            "error": {"type": "overloaded_error", "message": "Overloaded"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = auditor_for(&server)
        .audit(ARTICLE, "Economics")
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::AuditLogic(_)));
    assert!(err.to_string().contains("Overloaded"));
}

#[tokio::test]
async fn test_prose_only_answer_is_no_json_block() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "I am unable to audit this article."}],
            "usage": {"input_tokens": 10, "output_tokens": 9}
        })))
        .mount(&server)
        .await;

    let err = auditor_for(&server)
        .audit(ARTICLE, "Economics")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "AI failed to produce a JSON block.");
}
