//! World Bank Indicators API v2.

use serde_json::Value;

use super::{endpoint, get_json, FetchOutcome, ReferenceDataPoint};

pub(super) const SOURCE: &str = "World Bank";

/// World Bank codes annual growth-rate indicators with a `.ZG` suffix.
fn is_growth_rate(indicator: &str) -> bool {
    indicator.ends_with(".ZG")
}

/// Fetch the most recent non-empty value of an indicator for a country or aggregate.
pub(super) async fn fetch(
    http: &reqwest::Client,
    base_url: &str,
    indicator: &str,
    country: &str,
) -> FetchOutcome {
    let path = format!("v2/country/{country}/indicator/{indicator}");
    let params = [("format", "json"), ("mrnev", "1")];

    let url = match endpoint(base_url, &path, &params) {
        Ok(url) => url,
        Err(reason) => return FetchOutcome::Failed(reason),
    };

    match get_json(http, url).await {
        Ok(body) => parse_indicator(&body, indicator),
        Err(reason) => FetchOutcome::Failed(reason),
    }
}

/// The payload is a two-element array: paging metadata, then rows.
/// Errors come back as a 200 with a `message` list in the first element.
fn parse_indicator(body: &Value, indicator: &str) -> FetchOutcome {
    let Some(parts) = body.as_array() else {
        return FetchOutcome::Failed("World Bank payload is not an array".into());
    };
    if let Some(message) = parts.first().and_then(|meta| meta.get("message")) {
        return FetchOutcome::Failed(format!("World Bank error: {message}"));
    }

    let Some(latest) = parts
        .get(1)
        .and_then(Value::as_array)
        .and_then(|rows| rows.first())
    else {
        return FetchOutcome::Absent;
    };

    let date = latest
        .get("date")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let value = latest
        .get("value")
        .and_then(Value::as_f64)
        .map(|v| format_value(v, indicator));

    FetchOutcome::Found(ReferenceDataPoint {
        value,
        date,
        source: SOURCE.to_string(),
    })
}

fn format_value(value: f64, indicator: &str) -> String {
    if is_growth_rate(indicator) {
        format!("{value:.2}%")
    } else {
        value.to_string()
    }
}
