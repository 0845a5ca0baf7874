//! Claim enrichment: verify model-extracted claims against reference data.
//!
//! Each routable claim gets one gateway lookup. Lookups for different claims
//! are independent and run concurrently; every result is written back to the
//! claim it belongs to and nowhere else.

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, info};

use crate::gateway::{FetchOutcome, GatewayOperation, ReferenceDataPoint, ReferenceSource};
use crate::models::{DataAnchor, DATA_PENDING, NOT_APPLICABLE};
use crate::numeric::extract_number;
use crate::router::route;
use crate::sanitizer::decode_anchor;

/// Relative difference (in percent) below which a claim counts as a match.
pub const MATCH_THRESHOLD_PCT: f64 = 0.1;

/// Variances are reported to one decimal place.
const ROUNDING_SCALE: f64 = 10.0;

/// Variance label for claims within [`MATCH_THRESHOLD_PCT`].
pub const MATCH: &str = "Match";

/// One element of the model's `data_anchors` array.
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorSlot {
    /// A well-formed claim record, eligible for enrichment.
    Claim(DataAnchor),
    /// Anything else; carried through untouched.
    Other(Value),
}

impl AnchorSlot {
    pub fn from_value(value: Value) -> Self {
        if value.is_object() {
            if let Some(anchor) = decode_anchor(&value) {
                return AnchorSlot::Claim(anchor);
            }
        }
        AnchorSlot::Other(value)
    }

    /// Final claim for the response; malformed slots go through the sanitizer's rules.
    pub fn into_anchor(self) -> Option<DataAnchor> {
        match self {
            AnchorSlot::Claim(anchor) => Some(anchor),
            AnchorSlot::Other(value) => decode_anchor(&value),
        }
    }
}

/// Split a `data_anchors` value into slots. Missing or null means no claims.
pub fn anchor_slots(value: Option<Value>) -> Vec<AnchorSlot> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.into_iter().map(AnchorSlot::from_value).collect(),
        Some(other) => vec![AnchorSlot::from_value(other)],
    }
}

/// Enrich every routable claim in place.
///
/// Never fails: a claim whose lookup is absent or failed keeps its values.
/// All lookups for one call run concurrently on the caller's task.
pub async fn enrich<S>(slots: &mut [AnchorSlot], source: &S)
where
    S: ReferenceSource + ?Sized,
{
    let jobs: Vec<(usize, GatewayOperation)> = slots
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| match slot {
            AnchorSlot::Claim(anchor) => route(anchor).map(|op| (index, op)),
            AnchorSlot::Other(_) => None,
        })
        .collect();

    if jobs.is_empty() {
        debug!(slots = slots.len(), "no routable claims");
        return;
    }

    let routed = jobs.len();
    let lookups: Vec<_> = jobs
        .iter()
        .map(|(_, operation)| source.fetch(operation))
        .collect();
    let outcomes = join_all(lookups).await;

    let mut verified = 0usize;
    for ((index, operation), outcome) in jobs.into_iter().zip(outcomes) {
        let Some(AnchorSlot::Claim(anchor)) = slots.get_mut(index) else {
            continue;
        };
        match outcome {
            FetchOutcome::Found(point) => {
                apply_reference(anchor, &point);
                verified += 1;
            }
            FetchOutcome::Absent => {
                debug!(provider = operation.provider(), claim = %anchor.claim, "no reference data");
            }
            FetchOutcome::Failed(reason) => {
                debug!(
                    provider = operation.provider(),
                    claim = %anchor.claim,
                    reason = %reason,
                    "claim left unverified"
                );
            }
        }
    }

    info!(routed, verified, "enrichment finished");
}

/// Write one reference point onto its claim.
pub fn apply_reference(anchor: &mut DataAnchor, point: &ReferenceDataPoint) {
    match &point.value {
        None => {
            anchor.official_value = DATA_PENDING.to_string();
            anchor.variance = NOT_APPLICABLE.to_string();
        }
        Some(value) => {
            anchor.official_value = value.clone();
            anchor.source = format!("{} ({})", point.source, point.date);
            if let Some(variance) = compute_variance(&anchor.claim, value) {
                anchor.variance = variance;
            }
        }
    }
}

/// Variance label between a claim and an official figure.
///
/// `None` when either side has no number or the official figure is zero.
pub fn compute_variance(claim: &str, official: &str) -> Option<String> {
    let claimed = extract_number(claim)?;
    let official = extract_number(official)?;
    if official == 0.0 {
        return None;
    }
    let percent_diff = (claimed - official) / official * 100.0;
    Some(format_variance(percent_diff))
}

/// `"Match"` within the threshold, else a signed one-decimal percentage.
pub fn format_variance(percent_diff: f64) -> String {
    if percent_diff.abs() < MATCH_THRESHOLD_PCT {
        return MATCH.to_string();
    }
    let rounded = (percent_diff * ROUNDING_SCALE).round() / ROUNDING_SCALE;
    if rounded > 0.0 {
        format!("+{rounded:.1}%")
    } else {
        format!("{rounded:.1}%")
    }
}
