//! FRED (Federal Reserve Economic Data) observations.

use serde_json::Value;

use super::{endpoint, get_json, FetchOutcome, ReferenceDataPoint};

pub(super) const SOURCE: &str = "FRED";

/// FRED marks a listed-but-unpublished observation with a single dot.
const MISSING_VALUE: &str = ".";

/// Fetch the newest observation of a series.
pub(super) async fn fetch(
    http: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    series_id: &str,
    units: Option<&str>,
) -> FetchOutcome {
    let Some(api_key) = api_key else {
        tracing::debug!(series_id, "FRED disabled, no API key");
        return FetchOutcome::Absent;
    };

    let mut params = vec![
        ("series_id", series_id),
        ("api_key", api_key),
        ("file_type", "json"),
        ("sort_order", "desc"),
        ("limit", "1"),
    ];
    if let Some(units) = units {
        params.push(("units", units));
    }

    let url = match endpoint(base_url, "fred/series/observations", &params) {
        Ok(url) => url,
        Err(reason) => return FetchOutcome::Failed(reason),
    };

    match get_json(http, url).await {
        Ok(body) => parse_observations(&body),
        Err(reason) => FetchOutcome::Failed(reason),
    }
}

fn parse_observations(body: &Value) -> FetchOutcome {
    let Some(observations) = body.get("observations").and_then(Value::as_array) else {
        return FetchOutcome::Failed("FRED payload has no observations array".into());
    };
    let Some(latest) = observations.first() else {
        return FetchOutcome::Absent;
    };

    let date = latest
        .get("date")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let value = latest
        .get("value")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != MISSING_VALUE)
        .map(str::to_string);

    FetchOutcome::Found(ReferenceDataPoint {
        value,
        date,
        source: SOURCE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_latest_observation() {
        let body = json!({
            "count": 1,
            "observations": [
                {"realtime_start": "2024-10-04", "date": "2024-09-01", "value": "4.1"}
            ]
        });
        assert_eq!(
            parse_observations(&body),
            FetchOutcome::Found(ReferenceDataPoint {
                value: Some("4.1".into()),
                date: "2024-09-01".into(),
                source: "FRED".into(),
            })
        );
    }

    #[test]
    fn test_parse_missing_value_marker() {
        let body = json!({"observations": [{"date": "2024-10-01", "value": "."}]});
        let FetchOutcome::Found(point) = parse_observations(&body) else {
            panic!("expected a data point");
        };
        assert_eq!(point.value, None);
        assert_eq!(point.date, "2024-10-01");
    }

    #[test]
    fn test_parse_empty_and_malformed() {
        assert_eq!(
            parse_observations(&json!({"observations": []})),
            FetchOutcome::Absent
        );
        assert!(matches!(
            parse_observations(&json!({"error_code": 400})),
            FetchOutcome::Failed(_)
        ));
    }
}
