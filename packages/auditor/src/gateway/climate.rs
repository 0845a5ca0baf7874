//! NOAA NCEI "Climate at a Glance" global temperature anomalies.

use chrono::Datelike;
use serde_json::Value;

use super::{endpoint, get_json, reported_value, FetchOutcome, ReferenceDataPoint};

pub(super) const SOURCE: &str = "NOAA NCEI";

/// First year of the NOAA global record.
const FIRST_YEAR: i32 = 1850;

/// Fetch the latest annual anomaly (°C against the 20th-century mean).
pub(super) async fn fetch(http: &reqwest::Client, base_url: &str, region: &str) -> FetchOutcome {
    let year = chrono::Utc::now().year();
    // 12-month timescale ending in December: one annual value per year.
    let path = format!(
        "access/monitoring/climate-at-a-glance/global/time-series/{}/12/12/{}-{}/data.json",
        region.trim_matches('/'),
        FIRST_YEAR,
        year
    );

    let url = match endpoint(base_url, &path, &[]) {
        Ok(url) => url,
        Err(reason) => return FetchOutcome::Failed(reason),
    };

    match get_json(http, url).await {
        Ok(body) => parse_series(&body),
        Err(reason) => FetchOutcome::Failed(reason),
    }
}

/// `data` maps period keys to either a bare value or `{"anomaly": value}`.
fn parse_series(body: &Value) -> FetchOutcome {
    let Some(data) = body.get("data").and_then(Value::as_object) else {
        return FetchOutcome::Failed("NOAA payload has no data object".into());
    };
    let Some((period, entry)) = data.iter().max_by(|a, b| a.0.cmp(b.0)) else {
        return FetchOutcome::Absent;
    };

    let value = match entry {
        Value::Object(record) => record.get("anomaly").and_then(reported_value),
        other => reported_value(other),
    };

    FetchOutcome::Found(ReferenceDataPoint {
        value,
        date: period.clone(),
        source: SOURCE.to_string(),
    })
}
