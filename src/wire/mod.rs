// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire value model.
//!
//! Demarshalling always starts from a parsed [`WireValue`] tree; marshalling
//! never builds one and writes wire text directly (see [`text`]).

pub mod text;

use std::collections::HashMap;

use crate::core::{MarshalError, Result};

pub use text::{quote, wrap_tagged, ArrayWriter, ObjectWriter};

/// Literal null token.
pub const NULL_TOKEN: &str = "null";
/// Key carrying the wire type identifier of a tagged value.
pub const ENCODED_TYPE_KEY: &str = "^EncodedType";
/// Key carrying the plain encoding inside a tagged wrapper.
pub const VALUE_KEY: &str = "^Value";
/// Key carrying an enum constant name.
pub const ENUM_VALUE_KEY: &str = "^EnumStringValue";

/// Parsed JSON-like value.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(WireArray),
    Object(WireObject),
}

/// Parsed wire array. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireArray {
    items: Vec<WireValue>,
}

impl WireArray {
    /// Create a wire array from elements.
    pub fn new(items: Vec<WireValue>) -> Self {
        Self { items }
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Check if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<&WireValue> {
        self.items.get(index)
    }

    /// Iterate over elements.
    pub fn iter(&self) -> std::slice::Iter<'_, WireValue> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a WireArray {
    type Item = &'a WireValue;
    type IntoIter = std::slice::Iter<'a, WireValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Parsed wire object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireObject {
    entries: HashMap<String, WireValue>,
}

impl WireObject {
    /// Create a wire object from entries.
    pub fn new(entries: HashMap<String, WireValue>) -> Self {
        Self { entries }
    }

    /// Entry for `key`.
    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.entries.get(key)
    }

    /// Check if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Type identifier carried under [`ENCODED_TYPE_KEY`].
    pub fn encoded_type(&self) -> Option<&str> {
        self.get(ENCODED_TYPE_KEY).and_then(WireValue::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the object has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WireValue {
    /// Parse wire text.
    pub fn parse(text: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| MarshalError::parse("wire", format!("{e}")))?;
        Ok(Self::from(value))
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    /// Check if this is an object carrying a type tag.
    pub fn is_tagged(&self) -> bool {
        matches!(self, WireValue::Object(obj) if obj.encoded_type().is_some())
    }

    /// Try to get the inner array.
    pub fn as_array(&self) -> Option<&WireArray> {
        match self {
            WireValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get the inner object.
    pub fn as_object(&self) -> Option<&WireObject> {
        match self {
            WireValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Try to get the inner string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WireValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to read an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            WireValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Try to read a float (integers convert).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            WireValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Short name of the value's shape, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            WireValue::Null => "null",
            WireValue::Bool(_) => "boolean",
            WireValue::Number(_) => "number",
            WireValue::String(_) => "string",
            WireValue::Array(_) => "array",
            WireValue::Object(_) => "object",
        }
    }

    /// Expect an array, failing with a mismatch naming `type_name`.
    pub fn expect_array(&self, type_name: &str) -> Result<&WireArray> {
        self.as_array()
            .ok_or_else(|| MarshalError::mismatch(type_name, "array", self.kind_name()))
    }

    /// Expect an object, failing with a mismatch naming `type_name`.
    pub fn expect_object(&self, type_name: &str) -> Result<&WireObject> {
        self.as_object()
            .ok_or_else(|| MarshalError::mismatch(type_name, "object", self.kind_name()))
    }
}

impl From<serde_json::Value> for WireValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => WireValue::Null,
            serde_json::Value::Bool(b) => WireValue::Bool(b),
            serde_json::Value::Number(n) => WireValue::Number(n),
            serde_json::Value::String(s) => WireValue::String(s),
            serde_json::Value::Array(arr) => {
                WireValue::Array(WireArray::new(arr.into_iter().map(Self::from).collect()))
            }
            serde_json::Value::Object(obj) => WireValue::Object(WireObject::new(
                obj.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_array() {
        let wire = WireValue::parse("[[1,2],[3],null]").unwrap();
        let arr = wire.as_array().unwrap();
        assert_eq!(arr.size(), 3);
        assert_eq!(arr.get(0).unwrap().as_array().unwrap().size(), 2);
        assert_eq!(arr.get(1).unwrap().as_array().unwrap().get(0).unwrap().as_i64(), Some(3));
        assert!(arr.get(2).unwrap().is_null());
        assert!(arr.get(3).is_none());
    }

    #[test]
    fn test_parse_tagged_object() {
        let wire = WireValue::parse(r#"{"^EncodedType":"Person","name":"Ada"}"#).unwrap();
        let obj = wire.as_object().unwrap();
        assert_eq!(obj.encoded_type(), Some("Person"));
        assert_eq!(obj.get("name").and_then(WireValue::as_str), Some("Ada"));
        assert!(wire.is_tagged());
        assert!(!WireValue::parse(r#"{"name":"Ada"}"#).unwrap().is_tagged());
    }

    #[test]
    fn test_parse_error() {
        let err = WireValue::parse("[1,").unwrap_err();
        assert!(matches!(err, MarshalError::Parse { .. }));
    }

    #[test]
    fn test_expect_array_mismatch() {
        let wire = WireValue::parse("42").unwrap();
        let err = wire.expect_array("i32[]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch for 'i32[]': expected array, found number"
        );
    }

    #[test]
    fn test_numbers() {
        let wire = WireValue::parse("[1, 2.5, -7]").unwrap();
        let arr = wire.as_array().unwrap();
        assert_eq!(arr.get(0).unwrap().as_i64(), Some(1));
        assert_eq!(arr.get(1).unwrap().as_i64(), None);
        assert_eq!(arr.get(1).unwrap().as_f64(), Some(2.5));
        assert_eq!(arr.get(2).unwrap().as_i64(), Some(-7));
    }
}
