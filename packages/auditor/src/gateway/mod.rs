//! Reference data gateway.
//!
//! Uniform access to the public statistics providers used to verify claims.
//! Every provider answers with a [`FetchOutcome`]; no provider error ever
//! propagates to the caller.
//!
//! | Provider   | Credential     | Used for                                |
//! |------------|----------------|-----------------------------------------|
//! | FRED       | `FRED_API_KEY` | inflation, unemployment, market indices |
//! | EIA        | `EIA_API_KEY`  | crude oil spot price                    |
//! | World Bank | none           | world GDP growth, world population      |
//! | NOAA NCEI  | none           | global temperature anomaly              |

mod climate;
mod eia;
mod fred;
mod world_bank;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::config::GatewayConfig;
use crate::error::Result;

/// A concrete lookup against one provider, with fixed identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOperation {
    Fred {
        series_id: &'static str,
        units: Option<&'static str>,
    },
    Eia {
        route: &'static str,
        series: &'static str,
    },
    WorldBank {
        indicator: &'static str,
        country: &'static str,
    },
    ClimateAnomaly {
        region: &'static str,
    },
}

impl GatewayOperation {
    pub fn provider(&self) -> &'static str {
        match self {
            GatewayOperation::Fred { .. } => fred::SOURCE,
            GatewayOperation::Eia { .. } => eia::SOURCE,
            GatewayOperation::WorldBank { .. } => world_bank::SOURCE,
            GatewayOperation::ClimateAnomaly { .. } => climate::SOURCE,
        }
    }
}

/// A reference figure for one period, normalized across providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDataPoint {
    /// Formatted figure; `None` when the provider lists the period without a value yet.
    pub value: Option<String>,
    /// Period label as the provider reports it.
    pub date: String,
    /// Provider name.
    pub source: String,
}

/// Result of one gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(ReferenceDataPoint),
    /// No data: provider disabled, or the series has no rows.
    Absent,
    /// The call was attempted and failed.
    Failed(String),
}

/// Anything that can answer gateway operations.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn fetch(&self, operation: &GatewayOperation) -> FetchOutcome;
}

/// HTTP-backed gateway over all providers.
///
/// Credentials are captured at construction; calls never re-read the environment.
pub struct HttpGateway {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("logic-auditor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl ReferenceSource for HttpGateway {
    async fn fetch(&self, operation: &GatewayOperation) -> FetchOutcome {
        let outcome = match *operation {
            GatewayOperation::Fred { series_id, units } => {
                fred::fetch(
                    &self.http,
                    &self.config.fred_base_url,
                    self.config.fred_api_key.as_deref(),
                    series_id,
                    units,
                )
                .await
            }
            GatewayOperation::Eia { route, series } => {
                eia::fetch(
                    &self.http,
                    &self.config.eia_base_url,
                    self.config.eia_api_key.as_deref(),
                    route,
                    series,
                )
                .await
            }
            GatewayOperation::WorldBank { indicator, country } => {
                world_bank::fetch(
                    &self.http,
                    &self.config.world_bank_base_url,
                    indicator,
                    country,
                )
                .await
            }
            GatewayOperation::ClimateAnomaly { region } => {
                climate::fetch(&self.http, &self.config.noaa_base_url, region).await
            }
        };

        if let FetchOutcome::Failed(reason) = &outcome {
            tracing::warn!(
                provider = operation.provider(),
                ?operation,
                reason = %reason,
                "reference lookup failed"
            );
        }
        outcome
    }
}

/// Build an endpoint URL below a configurable base.
fn endpoint(
    base_url: &str,
    path: &str,
    params: &[(&str, &str)],
) -> std::result::Result<Url, String> {
    let raw = format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse_with_params(&raw, params).map_err(|e| format!("invalid URL {raw}: {e}"))
}

/// One GET, one JSON body. Anything but a 200 is a failure.
///
/// Failure reasons never carry the request URL: FRED and EIA take their key
/// in the query string.
async fn get_json(http: &reqwest::Client, url: Url) -> std::result::Result<Value, String> {
    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| format!("request failed: {}", e.without_url()))?;

    let status = resp.status();
    if status != StatusCode::OK {
        return Err(format!("unexpected status {}", status.as_u16()));
    }

    resp.json::<Value>()
        .await
        .map_err(|e| format!("malformed payload: {}", e.without_url()))
}

/// A provider's reported figure as text; null and blank strings are no value.
fn reported_value(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

/// Test utilities for the gateway.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock source answering from a fixed table; unknown operations are `Absent`.
    #[derive(Default)]
    pub struct MockReferenceSource {
        outcomes: HashMap<GatewayOperation, FetchOutcome>,
        calls: Mutex<Vec<GatewayOperation>>,
    }

    impl MockReferenceSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, operation: GatewayOperation, outcome: FetchOutcome) -> Self {
            self.outcomes.insert(operation, outcome);
            self
        }

        pub fn with_point(
            self,
            operation: GatewayOperation,
            value: Option<&str>,
            date: &str,
            source: &str,
        ) -> Self {
            self.with(
                operation,
                FetchOutcome::Found(ReferenceDataPoint {
                    value: value.map(str::to_string),
                    date: date.to_string(),
                    source: source.to_string(),
                }),
            )
        }

        pub fn calls(&self) -> Vec<GatewayOperation> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl ReferenceSource for MockReferenceSource {
        async fn fetch(&self, operation: &GatewayOperation) -> FetchOutcome {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(*operation);
            }
            self.outcomes
                .get(operation)
                .cloned()
                .unwrap_or(FetchOutcome::Absent)
        }
    }
}
