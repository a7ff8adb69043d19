//! Decoded value and record types

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A decoded field value
///
/// Serializes untagged, so JSON output carries plain numbers, strings,
/// arrays and objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// String value
    String(String),
    /// Ordered list of strings
    StringList(Vec<String>),
    /// Index to integer
    IntMap(BTreeMap<String, i64>),
    /// Index to string
    StringMap(BTreeMap<String, String>),
    /// Index to list of enum names
    EnumListMap(BTreeMap<String, Vec<String>>),
    /// Index to sub-index to integer
    NestedIntMap(BTreeMap<String, BTreeMap<String, i64>>),
}

impl Value {
    /// Convert to a display string
    ///
    /// Scalars render as their text; containers render as compact JSON.
    pub fn to_string_value(&self) -> String {
        match self {
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::String(s) => s.clone(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}

/// A decoded entry: tag name to value, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field
    ///
    /// A tag seen before keeps its original position and takes the new value.
    pub fn insert(&mut self, tag: impl Into<String>, value: Value) {
        let tag = tag.into();
        match self.fields.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((tag, value)),
        }
    }

    /// Look up a field by tag
    pub fn get(&self, tag: &str) -> Option<&Value> {
        self.fields.iter().find(|(t, _)| t == tag).map(|(_, v)| v)
    }

    /// Check whether a field is present
    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Remove a field, returning its value
    pub fn remove(&mut self, tag: &str) -> Option<Value> {
        let pos = self.fields.iter().position(|(t, _)| t == tag)?;
        Some(self.fields.remove(pos).1)
    }

    /// Iterate over fields in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(t, v)| (t.as_str(), v))
    }

    /// Field tags in document order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(t, _)| t.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (tag, value) in &self.fields {
            map.serialize_entry(tag, value)?;
        }
        map.end()
    }
}
