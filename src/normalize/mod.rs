//! Shape normalization — extracting a flat record array from an arbitrary
//! JSON payload.
//!
//! Upstream APIs are inconsistent about response envelopes: some return a
//! bare array, some wrap it under a generic key (`{"data": [...]}`), some
//! under the resource's own name (`{"marcas": [...]}`). Consumers only ever
//! want the array, so this module flattens all of those shapes. A payload
//! with no recognizable array is a shape mismatch, not an error — it
//! normalizes to an empty list.

use serde_json::Value;
use tracing::debug;

/// Generic wrapper keys, tried in this fixed order before any
/// resource-specific key.
pub const CANDIDATE_KEYS: [&str; 5] = ["data", "items", "rows", "result", "results"];

/// Extracts a flat record array from `payload`.
///
/// - A bare JSON array is returned as-is.
/// - An object is probed for the first array under [`CANDIDATE_KEYS`], then
///   under `wrapper_keys` (resource-specific names like `"marcas"`).
/// - Anything else — or an object with no array under any candidate key —
///   yields an empty vector.
///
/// The returned vector is always a valid (possibly empty) record list;
/// callers never see `null` or a non-array.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vitrine::normalize::extract_records;
///
/// let wrapped = json!({ "items": [{ "nome": "Fiat" }] });
/// let records = extract_records(wrapped, &["marcas"]);
/// assert_eq!(records.len(), 1);
///
/// assert!(extract_records(json!({ "foo": 1 }), &[]).is_empty());
/// ```
pub fn extract_records(payload: Value, wrapper_keys: &[&str]) -> Vec<Value> {
    match payload {
        Value::Array(records) => records,
        Value::Object(mut map) => {
            for key in CANDIDATE_KEYS.iter().copied().chain(wrapper_keys.iter().copied()) {
                if matches!(map.get(key), Some(Value::Array(_))) {
                    if let Some(Value::Array(records)) = map.remove(key) {
                        debug!(key, count = records.len(), "unwrapped record array");
                        return records;
                    }
                }
            }
            debug!("no record array under any candidate key");
            Vec::new()
        }
        _ => Vec::new(),
    }
}
