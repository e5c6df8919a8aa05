//! Response envelope unwrapping.
//!
//! Endpoints return lists as a bare array or wrapped under `data`, `results`,
//! or `appointments`; single objects come bare or under `data`.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

const LIST_KEYS: [&str; 3] = ["data", "results", "appointments"];

/// Extract the list items from any supported envelope; unknown shapes yield
/// an empty list.
pub fn list_items(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in LIST_KEYS {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Deserialize a list payload into typed items.
///
/// # Errors
///
/// Returns the first item that fails to deserialize.
pub fn parse_list<T: DeserializeOwned>(payload: Value) -> Result<Vec<T>, serde_json::Error> {
    list_items(payload).into_iter().map(serde_json::from_value).collect()
}

/// Deserialize a single object that may be wrapped under `data`.
///
/// # Errors
///
/// Returns an error if neither the wrapped nor the bare shape matches `T`.
pub fn parse_object<T: DeserializeOwned>(payload: Value) -> Result<T, serde_json::Error> {
    match payload {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_))) => {
            let inner = map.remove("data").unwrap_or(Value::Null);
            serde_json::from_value(inner)
        }
        other => serde_json::from_value(other),
    }
}
