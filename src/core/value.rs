// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-memory object graph marshalled by the generated factory.
//!
//! A [`Value`] knows its own runtime type identifier, which is what the
//! marshalling session uses to pick a marshaller when an element is
//! dynamically typed (collection elements, `any` fields).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{ArraySignature, PrimitiveType, LIST_TYPE, MAP_TYPE, SET_TYPE, STRING_TYPE};

/// Field name -> value mapping of an object.
pub type ObjectFields = BTreeMap<String, Value>;

/// A marshallable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absent value
    Null,

    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),

    String(String),

    /// Ordered collection
    List(Vec<Value>),

    /// Insertion-ordered collection without duplicates
    Set(Vec<Value>),

    /// Key/value entries in insertion order
    Map(Vec<(Value, Value)>),

    /// Typed array of any dimension
    Array(ArrayValue),

    /// Enum constant
    Enum(EnumValue),

    /// Instance of an exposed object type
    Object(ObjectValue),
}

/// Typed array; nested dimensions are `Value::Array` elements of the
/// inner signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    /// Shape of this array
    pub signature: ArraySignature,
    /// Elements at the outermost dimension
    pub items: Vec<Value>,
}

impl ArrayValue {
    /// Create an array value.
    pub fn new(signature: ArraySignature, items: Vec<Value>) -> Self {
        Self { signature, items }
    }

    /// Create a zero-length array.
    pub fn empty(signature: ArraySignature) -> Self {
        Self {
            signature,
            items: Vec::new(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Enum constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Enum type identifier
    pub type_name: String,
    /// Constant name
    pub variant: String,
}

/// Instance of an exposed object type.
///
/// A field set to [`Value::Null`] compares equal to an absent field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectValue {
    /// Type identifier (canonical name or alias)
    pub type_name: String,
    /// Field values
    pub fields: ObjectFields,
}

impl ObjectValue {
    /// Create an object with no fields set.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: ObjectFields::new(),
        }
    }

    /// Builder-style field assignment.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        fn present(fields: &ObjectFields) -> impl Iterator<Item = (&String, &Value)> {
            fields.iter().filter(|(_, v)| !v.is_null())
        }
        self.type_name == other.type_name && present(&self.fields).eq(present(&other.fields))
    }
}

impl Value {
    /// Create a list.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Create a set, dropping duplicates while keeping first-seen order.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut out: Vec<Value> = Vec::new();
        for item in items {
            if !out.contains(&item) {
                out.push(item);
            }
        }
        Value::Set(out)
    }

    /// Create a map from entries.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(entries.into_iter().collect())
    }

    /// Create an array value.
    pub fn array(signature: ArraySignature, items: Vec<Value>) -> Self {
        Value::Array(ArrayValue::new(signature, items))
    }

    /// Create an enum constant.
    pub fn enumeration(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Value::Enum(EnumValue {
            type_name: type_name.into(),
            variant: variant.into(),
        })
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Primitive type of a scalar value.
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self {
            Value::Bool(_) => Some(PrimitiveType::Bool),
            Value::I8(_) => Some(PrimitiveType::I8),
            Value::I16(_) => Some(PrimitiveType::I16),
            Value::I32(_) => Some(PrimitiveType::I32),
            Value::I64(_) => Some(PrimitiveType::I64),
            Value::F32(_) => Some(PrimitiveType::F32),
            Value::F64(_) => Some(PrimitiveType::F64),
            Value::Char(_) => Some(PrimitiveType::Char),
            _ => None,
        }
    }

    /// Runtime wire identifier of this value.
    ///
    /// Returns `None` for null, which has no type of its own.
    pub fn type_id(&self) -> Option<String> {
        if let Some(p) = self.primitive_type() {
            return Some(p.name().to_string());
        }
        match self {
            Value::Null => None,
            Value::String(_) => Some(STRING_TYPE.to_string()),
            Value::List(_) => Some(LIST_TYPE.to_string()),
            Value::Set(_) => Some(SET_TYPE.to_string()),
            Value::Map(_) => Some(MAP_TYPE.to_string()),
            Value::Array(arr) => Some(arr.signature.type_id()),
            Value::Enum(e) => Some(e.type_name.clone()),
            Value::Object(o) => Some(o.type_name.clone()),
            _ => None,
        }
    }

    /// Short name of the value's shape, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Array(_) => "array",
            Value::Enum(_) => "enum",
            Value::Object(_) => "object",
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner object.
    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Try to get the inner array.
    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get list or set elements.
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::I8(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::I16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<ObjectValue> for Value {
    fn from(v: ObjectValue) -> Self {
        Value::Object(v)
    }
}

impl From<ArrayValue> for Value {
    fn from(v: ArrayValue) -> Self {
        Value::Array(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
