//! U.S. Energy Information Administration API v2.

use serde_json::Value;

use super::{endpoint, get_json, reported_value, FetchOutcome, ReferenceDataPoint};

pub(super) const SOURCE: &str = "EIA";

/// Fetch the newest daily value of a series below an EIA route.
pub(super) async fn fetch(
    http: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    route: &str,
    series: &str,
) -> FetchOutcome {
    let Some(api_key) = api_key else {
        tracing::debug!(route, series, "EIA disabled, no API key");
        return FetchOutcome::Absent;
    };

    let path = format!("v2/{}/data/", route.trim_matches('/'));
    let params = [
        ("api_key", api_key),
        ("frequency", "daily"),
        ("data[0]", "value"),
        ("facets[series][]", series),
        ("sort[0][column]", "period"),
        ("sort[0][direction]", "desc"),
        ("offset", "0"),
        ("length", "1"),
    ];

    let url = match endpoint(base_url, &path, &params) {
        Ok(url) => url,
        Err(reason) => return FetchOutcome::Failed(reason),
    };

    match get_json(http, url).await {
        Ok(body) => parse_data(&body),
        Err(reason) => FetchOutcome::Failed(reason),
    }
}

fn parse_data(body: &Value) -> FetchOutcome {
    let Some(rows) = body
        .get("response")
        .and_then(|r| r.get("data"))
        .and_then(Value::as_array)
    else {
        return FetchOutcome::Failed("EIA payload has no response.data array".into());
    };
    let Some(latest) = rows.first() else {
        return FetchOutcome::Absent;
    };

    let date = latest
        .get("period")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let value = latest.get("value").and_then(reported_value);

    FetchOutcome::Found(ReferenceDataPoint {
        value,
        date,
        source: SOURCE.to_string(),
    })
}
