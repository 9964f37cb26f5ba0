//! Heuristic search for the report array in a provider response.
//!
//! The provider does not commit to a response schema, so instead of a typed
//! envelope the response tree is walked breadth-first until an array that
//! looks like a list of per-period reports turns up.

use serde_json::Value;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// An object carrying any of these keys is taken to be a report.
const REPORT_MARKER_KEYS: [&str; 5] = [
    "year",
    "period",
    "balance_sheet",
    "balance",
    "income_statement",
];

/// Keys that usually wrap the report array, visited before all other keys.
const CONTAINER_KEYS: [&str; 7] = [
    "finances", "data", "items", "reports", "results", "entries", "values",
];

/// Whether an array looks like a list of financial reports.
///
/// True when any element is an object with at least one report marker key.
pub fn looks_like_reports(items: &[Value]) -> bool {
    items.iter().any(|item| {
        item.as_object()
            .is_some_and(|map| REPORT_MARKER_KEYS.iter().any(|key| map.contains_key(*key)))
    })
}

/// Find the per-period report array inside an arbitrary response.
///
/// The root itself is checked first. Object children are queued with the
/// usual container keys first, then the remaining keys in document order.
/// Returns an empty slice when no array matches.
pub fn locate(response: &Value) -> &[Value] {
    let mut queue: VecDeque<(&Value, String)> = VecDeque::new();
    let mut visited: HashSet<*const Value> = HashSet::new();
    queue.push_back((response, String::from("$")));

    while let Some((node, path)) = queue.pop_front() {
        if !visited.insert(std::ptr::from_ref(node)) {
            continue;
        }

        match node {
            Value::Array(items) => {
                if looks_like_reports(items) {
                    debug!(%path, reports = items.len(), "located report array");
                    return items;
                }
                for (idx, item) in items.iter().enumerate() {
                    if is_composite(item) {
                        queue.push_back((item, format!("{path}[{idx}]")));
                    }
                }
            }
            Value::Object(map) => {
                let preferred = CONTAINER_KEYS
                    .iter()
                    .filter_map(|key| map.get_key_value(*key));
                let others = map
                    .iter()
                    .filter(|(key, _)| !CONTAINER_KEYS.contains(&key.as_str()));

                for (key, child) in preferred.chain(others) {
                    if is_composite(child) {
                        queue.push_back((child, format!("{path}.{key}")));
                    }
                }
            }
            _ => {}
        }
    }

    debug!("no report array found in response");
    &[]
}

const fn is_composite(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_locate_nested_items() {
        let response = json!({ "data": { "items": [{ "year": 2023, "balance_sheet": {} }] } });
        let found = locate(&response);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["year"], json!(2023));
    }

    #[test]
    fn test_locate_bare_array() {
        let response = json!([{ "period": "2023" }, { "unrelated": true }]);
        assert_eq!(locate(&response).len(), 2);
    }

    #[test]
    fn test_container_keys_take_priority() {
        let response = json!({
            "meta": [{ "year": 1999 }],
            "finances": [{ "year": 2023 }, { "year": 2022 }],
        });
        let found = locate(&response);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0]["year"], json!(2023));
    }

    #[test]
    fn test_breadth_first_prefers_shallow_match() {
        let response = json!({
            "data": { "deep": { "deeper": [{ "year": 1 }] } },
            "other": [{ "income_statement": {} }],
        });
        let found = locate(&response);
        assert!(found[0].get("income_statement").is_some());
    }

    #[test]
    fn test_non_matching_arrays_are_searched_through() {
        let response = json!({
            "results": [
                { "company": "x", "history": [{ "balance": { "1600": 10 } }] }
            ]
        });
        let found = locate(&response);
        assert_eq!(found.len(), 1);
        assert!(found[0].get("balance").is_some());
    }

    #[test]
    fn test_nothing_found_is_empty() {
        assert!(locate(&json!({ "data": { "items": [1, 2, 3] } })).is_empty());
        assert!(locate(&json!({ "error": "not found" })).is_empty());
        assert!(locate(&json!(null)).is_empty());
        assert!(locate(&json!([])).is_empty());
    }

    #[test]
    fn test_looks_like_reports() {
        assert!(looks_like_reports(&[json!(1), json!({ "balance_sheet": null })]));
        assert!(!looks_like_reports(&[json!({ "name": "x" }), json!("year")]));
    }
}
