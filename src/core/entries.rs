//! Id extraction shared by the deleted-entries rule and the reconciler.
//!
//! Accepted entry shapes: a positive number (`3`, `"3"`) or an object with the
//! single key `id` holding one (`{"id": 3}`).

use serde_json::Value;

/// A positive integer id, from a JSON number or a numeric string.
pub fn positive_id(value: &Value) -> Option<i64> {
    let n = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    (n > 0).then_some(n)
}

fn entry_id(entry: &Value) -> Option<i64> {
    match entry {
        Value::Object(map) if map.len() == 1 => map.get("id").and_then(positive_id),
        Value::Object(_) => None,
        other => positive_id(other),
    }
}

/// Validation rule for the deleted-entries parameter: an array whose
/// elements all have one of the accepted shapes.
pub fn validate_deleted_entries(entries: &Value) -> bool {
    match entries {
        Value::Array(list) => list.iter().all(|e| entry_id(e).is_some()),
        _ => false,
    }
}

/// Ids of the well-formed entries; malformed ones are skipped.
pub fn extract_entry_ids(entries: &Value) -> Vec<i64> {
    match entries {
        Value::Array(list) => list.iter().filter_map(entry_id).collect(),
        _ => Vec::new(),
    }
}
