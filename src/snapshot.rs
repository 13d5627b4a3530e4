//! Snapshot loading.
//!
//! A snapshot is a JSON object mapping record keys to field objects, with
//! values in the shapes the cache stores natively. The loader reads and
//! parses the whole file up front so the cache lock is never held across
//! I/O, and rejects malformed input instead of repairing it.

use std::fs;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::document::{FieldValue, Record};
use crate::error::{Result, ShrikeError};

/// Read a JSON snapshot into ordered `(key, record)` pairs.
///
/// Object order in the document becomes store insertion order, so loading
/// the same snapshot always produces the same index.
pub fn load_snapshot(path: &Path) -> Result<Vec<(String, Record)>> {
    let text = fs::read_to_string(path)?;
    let root: Value = serde_json::from_str(&text)?;
    let Value::Object(entries) = root else {
        return Err(ShrikeError::invalid_input(
            "snapshot root must be a JSON object",
        ));
    };

    let mut data = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        if key.is_empty() {
            return Err(ShrikeError::invalid_input(
                "snapshot record keys must not be empty",
            ));
        }
        let Value::Object(fields) = value else {
            return Err(ShrikeError::invalid_input(format!(
                "record '{key}' must be a JSON object"
            )));
        };
        let mut record = Record::new();
        for (name, field) in fields {
            record.add_field(name, field_value_from_json(&field));
        }
        data.push((key, record));
    }
    debug!("snapshot loaded: {} records from {}", data.len(), path.display());
    Ok(data)
}

/// Convert a parsed JSON value into the cache's tagged value type. Numbers
/// become integers when they fit, floats otherwise.
pub fn field_value_from_json(value: &Value) -> FieldValue {
    match value {
        Value::String(s) => FieldValue::Text(s.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Integer(i),
            None => FieldValue::Float(n.as_f64().unwrap_or(0.0)),
        },
        Value::Bool(b) => FieldValue::Boolean(*b),
        Value::Array(items) => {
            FieldValue::Array(items.iter().map(field_value_from_json).collect())
        }
        Value::Object(entries) => FieldValue::Object(
            entries
                .iter()
                .map(|(name, nested)| (name.clone(), field_value_from_json(nested)))
                .collect(),
        ),
        Value::Null => FieldValue::Null,
    }
}
