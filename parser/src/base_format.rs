use crate::{ExtractOptions, NodeRecord};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Base trait that all node formats must implement.
///
/// A format pairs a structural predicate with an extractor. The predicate only
/// looks at shape; it is not full schema validation.
pub trait Format: Send + Sync {
    /// Returns the registry name of this format (e.g. "meshviewer", "alfred")
    fn name(&self) -> &'static str;

    /// Alternative names accepted when looking a format up by hint
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Checks whether the payload has the shape of this format
    fn matches(&self, data: &Value) -> bool;

    /// Extract normalized node records from a payload that `matches`.
    ///
    /// Never fails: nodes without a model are dropped or kept as gateways,
    /// anything else the format does not recognise is skipped.
    fn extract(&self, data: &Value, options: &ExtractOptions) -> Vec<NodeRecord>;
}

/// Follow `path` through nested objects and return the string at the end.
pub fn string_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .and_then(Value::as_str)
}

/// Record for the model found at `path`, if any.
pub fn model_at(value: &Value, path: &[&str]) -> Option<NodeRecord> {
    string_at(value, path).map(NodeRecord::new)
}

/// True when `key` holds a string.
pub fn has_string(data: &Value, key: &str) -> bool {
    data.get(key).map_or(false, Value::is_string)
}

/// True when `version` holds the JSON integer `expected` (`2.0` does not count).
pub fn has_version(data: &Value, expected: u64) -> bool {
    data.get("version").and_then(Value::as_u64) == Some(expected)
}

/// True when `key` holds an array whose every element is an object.
pub fn is_object_array(data: &Value, key: &str) -> bool {
    data.get(key)
        .and_then(Value::as_array)
        .map_or(false, |items| items.iter().all(Value::is_object))
}

/// Hardware address check: six colon separated groups of two hex digits.
pub fn is_hardware_address(candidate: &str) -> bool {
    let groups: Vec<&str> = candidate.split(':').collect();
    groups.len() == 6
        && groups
            .iter()
            .all(|g| g.len() == 2 && g.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Parse the top-level `timestamp` of a snapshot.
///
/// Returns `None` for missing or non RFC 3339 values; meshviewer and nodes.json
/// both write RFC 3339 but some generators omit the offset.
pub fn snapshot_timestamp(data: &Value) -> Option<DateTime<Utc>> {
    let raw = data.get("timestamp")?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
