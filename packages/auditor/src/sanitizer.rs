//! Tolerant decoding of model output into the fixed response contract.
//!
//! The model's JSON is never trusted for shape. Every field is decoded
//! element by element with defaults, so the result always serializes to
//! the same structure the frontend renders. Sanitizing an already
//! sanitized result changes nothing.

use serde_json::{Map, Value};

use crate::models::{AuditResult, DataAnchor, LogicalFlaw, NOT_APPLICABLE, UNVERIFIED};

/// Stand-in when a conflict record names neither a conflict nor a claim.
pub const CONFLICT_PLACEHOLDER: &str = "Unspecified conflict";

/// Decode arbitrary model JSON into an [`AuditResult`].
pub fn sanitize(raw: &Value) -> AuditResult {
    match raw {
        Value::Object(map) => AuditResult {
            theses: text_list(map.get("theses")),
            logical_flaws: elements(map.get("logical_flaws"))
                .into_iter()
                .filter_map(decode_flaw)
                .collect(),
            data_anchors: elements(map.get("data_anchors"))
                .into_iter()
                .filter_map(decode_anchor)
                .collect(),
            unresolved_conflicts: elements(map.get("unresolved_conflicts"))
                .into_iter()
                .filter_map(flatten_conflict)
                .collect(),
            next_steps: text_list(map.get("next_steps")),
            summary: map.get("summary").and_then(scalar_text),
        },
        // A bare list of strings is the model answering with theses only.
        Value::Array(_) => AuditResult {
            theses: text_list(Some(raw)),
            ..AuditResult::default()
        },
        _ => AuditResult::default(),
    }
}

/// Decode one `data_anchors` element.
///
/// Records keep whatever string fields the model supplied and get sentinels
/// for the rest; a bare string becomes an unverified claim; anything else is
/// dropped.
pub fn decode_anchor(value: &Value) -> Option<DataAnchor> {
    match value {
        Value::Object(map) => Some(DataAnchor {
            claim: field_text(map, &["claim"]).unwrap_or_default(),
            category: field_text(map, &["category"]),
            source: field_text(map, &["source"]).unwrap_or_default(),
            official_value: field_text(map, &["official_value"])
                .unwrap_or_else(|| UNVERIFIED.to_string()),
            variance: field_text(map, &["variance"]).unwrap_or_else(|| NOT_APPLICABLE.to_string()),
        }),
        Value::String(claim) => Some(DataAnchor::new(claim.clone())),
        _ => None,
    }
}

/// Collapse one `unresolved_conflicts` element into a single line.
///
/// The frontend fails on non-string array elements, so records are rendered
/// as `"<conflict or claim>: <detail or note>"`.
pub fn flatten_conflict(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Object(map) => {
            let head = field_text(map, &["conflict", "claim"])
                .unwrap_or_else(|| CONFLICT_PLACEHOLDER.to_string());
            let detail = field_text(map, &["detail", "note"]).unwrap_or_default();
            Some(format!("{head}: {detail}"))
        }
        other => scalar_text(other),
    }
}

fn decode_flaw(value: &Value) -> Option<LogicalFlaw> {
    match value {
        Value::Object(map) => Some(LogicalFlaw {
            flaw_type: field_text(map, &["flaw_type", "type"]).unwrap_or_default(),
            lawyers_note: field_text(map, &["lawyers_note", "note", "explanation"])
                .unwrap_or_default(),
            quote: field_text(map, &["quote"]).unwrap_or_default(),
            severity: field_text(map, &["severity"]).unwrap_or_default(),
        }),
        Value::String(note) => Some(LogicalFlaw {
            lawyers_note: note.clone(),
            ..LogicalFlaw::default()
        }),
        _ => None,
    }
}

/// A list field as its elements; a lone value counts as a one-element list.
fn elements(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

/// Strings pass through; other values are rendered as compact JSON text.
fn text_list(value: Option<&Value>) -> Vec<String> {
    elements(value)
        .into_iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        })
        .collect()
}

/// First non-empty scalar among `keys`, as text.
fn field_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .filter_map(scalar_text)
        .find(|text| !text.is_empty())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
