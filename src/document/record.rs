//! Record structure: an ordered collection of named field values.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::document::field_value::FieldValue;

/// A record is a flat collection of named field values.
///
/// Field order is preserved: iteration yields fields in the order they were
/// first added, so extraction and indexing are deterministic.
///
/// # Examples
///
/// ```
/// use shrike::document::{FieldValue, Record};
///
/// let mut record = Record::new();
/// record.add_field("title", FieldValue::Text("Rust Book".to_string()));
/// record.add_field("year", FieldValue::Integer(2024));
///
/// assert_eq!(record.len(), 2);
/// assert!(record.has_field("title"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
    /// Field names in the order they were first added.
    field_names: Vec<String>,
}

impl Record {
    /// Create a new empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Start building a record with the fluent API.
    ///
    /// ```
    /// use shrike::document::Record;
    ///
    /// let record = Record::builder()
    ///     .add_text("title", "Rust Programming")
    ///     .add_integer("year", 2024)
    ///     .add_boolean("available", true)
    ///     .build();
    ///
    /// assert_eq!(record.field_names().len(), 3);
    /// ```
    pub fn builder() -> RecordBuilder {
        RecordBuilder::new()
    }

    /// Add or replace a field. New fields append to the iteration order;
    /// replacing a field keeps its original position.
    pub fn add_field<S: Into<String>>(&mut self, name: S, value: FieldValue) {
        let name = name.into();
        if !self.fields.contains_key(&name) {
            self.field_names.push(name.clone());
        }
        self.fields.insert(name, value);
    }

    /// Get a field value by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Check whether a field exists.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Remove a field, returning its value.
    pub fn remove_field(&mut self, name: &str) -> Option<FieldValue> {
        let removed = self.fields.remove(name);
        if removed.is_some() {
            self.field_names.retain(|n| n != name);
        }
        removed
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.field_names
            .iter()
            .filter_map(|name| self.fields.get(name).map(|value| (name.as_str(), value)))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Builder for [`Record`] with typed convenience methods.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        RecordBuilder::default()
    }

    /// Add a field with an explicit [`FieldValue`].
    pub fn add_field<S: Into<String>>(mut self, name: S, value: FieldValue) -> Self {
        self.record.add_field(name, value);
        self
    }

    /// Add a text field.
    pub fn add_text<S: Into<String>, T: Into<String>>(self, name: S, value: T) -> Self {
        self.add_field(name, FieldValue::Text(value.into()))
    }

    /// Add an integer field.
    pub fn add_integer<S: Into<String>>(self, name: S, value: i64) -> Self {
        self.add_field(name, FieldValue::Integer(value))
    }

    /// Add a float field.
    pub fn add_float<S: Into<String>>(self, name: S, value: f64) -> Self {
        self.add_field(name, FieldValue::Float(value))
    }

    /// Add a boolean field.
    pub fn add_boolean<S: Into<String>>(self, name: S, value: bool) -> Self {
        self.add_field(name, FieldValue::Boolean(value))
    }

    /// Finish building the record.
    pub fn build(self) -> Record {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_preserved() {
        let record = Record::builder()
            .add_text("b", "two")
            .add_text("a", "one")
            .add_text("c", "three")
            .build();

        assert_eq!(record.field_names(), &["b", "a", "c"]);

        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut record = Record::builder().add_text("a", "one").add_text("b", "two").build();
        record.add_field("a", FieldValue::Integer(1));

        assert_eq!(record.field_names(), &["a", "b"]);
        assert_eq!(record.get_field("a"), Some(&FieldValue::Integer(1)));
    }

    #[test]
    fn test_remove_field() {
        let mut record = Record::builder().add_text("a", "one").add_text("b", "two").build();

        assert_eq!(
            record.remove_field("a"),
            Some(FieldValue::Text("one".to_string()))
        );
        assert_eq!(record.remove_field("a"), None);
        assert_eq!(record.field_names(), &["b"]);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_serializes_in_field_order() {
        let record = Record::builder()
            .add_text("name", "Tris")
            .add_integer("age", 20)
            .build();

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"Tris","age":20}"#);
    }
}
