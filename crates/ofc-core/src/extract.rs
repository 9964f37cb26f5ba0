//! Synonym-driven field extraction.
//!
//! A report container is either a keyed object (`{"revenue": 1000}`) or a
//! list of coded line items (`[{"code": "2110", "name": "revenue", "value": 1000}]`).
//! Both are looked up through the same ordered list of acceptable keys.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Keys a coded line item may carry its amount under, in order of preference.
const ENTRY_AMOUNT_KEYS: [&str; 4] = ["value", "amount", "sum", "total"];

/// Keys that identify a coded line item.
const ENTRY_ID_KEYS: [&str; 2] = ["code", "name"];

/// Find the first of `keys` present in `source` with a non-null value.
///
/// Non-container sources (scalars, `null`) never match. The returned value
/// may still be non-numeric; see [`crate::normalize_field`].
pub fn lookup<'a>(source: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    match source {
        Value::Object(map) => lookup_in_map(map, keys),
        Value::Array(entries) => {
            let index = index_entries(entries);
            keys.iter().find_map(|key| index.get(*key).copied())
        }
        _ => None,
    }
}

/// Extract the value for the first matching key, defaulting to `0`.
///
/// Absence is not an error: a source with none of `keys` yields the number
/// zero.
pub fn extract(source: &Value, keys: &[&str]) -> Value {
    lookup(source, keys)
        .cloned()
        .unwrap_or_else(|| Value::from(0))
}

fn lookup_in_map<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

/// Build a `code`/`name` → amount index over a list of line items.
///
/// Later entries overwrite earlier ones that share a code or name. Entries
/// without any non-null amount are skipped and overwrite nothing.
fn index_entries(entries: &[Value]) -> HashMap<String, &Value> {
    let mut index = HashMap::new();

    for entry in entries {
        let Value::Object(fields) = entry else {
            continue;
        };
        let Some(amount) = lookup_in_map(fields, &ENTRY_AMOUNT_KEYS) else {
            continue;
        };

        for id_key in ENTRY_ID_KEYS {
            if let Some(id) = fields.get(id_key).and_then(entry_id) {
                index.insert(id, amount);
            }
        }
    }

    index
}

/// Codes come as strings (`"1210"`) or bare numbers (`1210`).
fn entry_id(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
