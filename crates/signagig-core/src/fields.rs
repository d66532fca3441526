//! Normalization of multi-value profile fields.
//!
//! `platforms` and `affiliate_platforms` have been stored in several shapes
//! over time: JSON arrays, JSON-encoded array strings, and (currently) plain
//! comma-joined strings. Every shape must stay readable without a migration.

use serde_json::Value;

/// A stored multi-value field whose shape is not known until it is read.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredField {
    /// Absent or `NULL`.
    Missing,
    Text(String),
    /// A real list; elements are not guaranteed to be strings.
    List(Vec<Value>),
    /// Any other value (number, bool, object).
    Other,
}

impl From<Option<String>> for StoredField {
    fn from(value: Option<String>) -> Self {
        value.map_or(StoredField::Missing, StoredField::Text)
    }
}

impl From<&str> for StoredField {
    fn from(value: &str) -> Self {
        StoredField::Text(value.to_string())
    }
}

impl From<Value> for StoredField {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => StoredField::Missing,
            Value::String(s) => StoredField::Text(s),
            Value::Array(items) => StoredField::List(items),
            Value::Bool(_) | Value::Number(_) | Value::Object(_) => StoredField::Other,
        }
    }
}

/// Convert a stored field into an ordered list of non-empty, trimmed strings.
///
/// Never fails: anything unparseable degrades to a single element or to an
/// empty list. Duplicates are kept.
#[must_use]
pub fn normalize_field(field: &StoredField) -> Vec<String> {
    match field {
        StoredField::List(items) => clean_items(items),
        StoredField::Text(raw) => normalize_text(raw),
        StoredField::Missing | StoredField::Other => Vec::new(),
    }
}

/// Join values into the canonical comma-separated stored form.
#[must_use]
pub fn join_field(values: &[String]) -> String {
    values.join(",")
}

fn normalize_text(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.contains(',') {
        return trimmed
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect();
    }

    // Legacy rows hold a JSON-encoded array.
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => clean_items(&items),
        _ => vec![trimmed.to_string()],
    }
}

fn clean_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "fields_test.rs"]
mod tests;
