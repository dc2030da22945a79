// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Primitive and string marshallers.
//!
//! Coercion is strict: an `i32` marshaller only accepts `Value::I32` and a
//! wire number that fits in 32 bits. Non-finite floats cannot be encoded.

use crate::core::{MarshalError, PrimitiveType, Result, TypeRef, Value};
use crate::wire::{quote, WireValue};

use super::{Marshaller, MarshallingSession};

/// Marshaller for one primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarMarshaller {
    primitive: PrimitiveType,
}

impl ScalarMarshaller {
    /// Create a marshaller for `primitive`.
    pub fn new(primitive: PrimitiveType) -> Self {
        Self { primitive }
    }

    /// Marshaller class name under which this marshaller is provided.
    pub fn class_name(primitive: PrimitiveType) -> &'static str {
        match primitive {
            PrimitiveType::Bool => "BoolMarshaller",
            PrimitiveType::I8 => "I8Marshaller",
            PrimitiveType::I16 => "I16Marshaller",
            PrimitiveType::I32 => "I32Marshaller",
            PrimitiveType::I64 => "I64Marshaller",
            PrimitiveType::F32 => "F32Marshaller",
            PrimitiveType::F64 => "F64Marshaller",
            PrimitiveType::Char => "CharMarshaller",
        }
    }

    fn mismatch(&self, expected: &str, found: impl Into<String>) -> MarshalError {
        MarshalError::mismatch(self.primitive.name(), expected, found)
    }

    fn encode_float(&self, value: f64, text: Result<String>) -> Result<String> {
        if value.is_finite() {
            text
        } else {
            Err(self.mismatch("finite number", value.to_string()))
        }
    }

    fn read_integer(&self, wire: &WireValue) -> Result<i64> {
        wire.as_i64()
            .ok_or_else(|| self.mismatch("integer", wire.kind_name()))
    }

    fn narrow<T: TryFrom<i64>>(&self, raw: i64) -> Result<T> {
        T::try_from(raw).map_err(|_| self.mismatch("integer in range", raw.to_string()))
    }
}

impl Marshaller for ScalarMarshaller {
    fn type_handled(&self) -> TypeRef {
        TypeRef::Primitive(self.primitive)
    }

    fn self_describing(&self) -> bool {
        self.primitive == PrimitiveType::Bool
    }

    fn marshall_value(&self, value: &Value, _session: &MarshallingSession<'_>) -> Result<String> {
        match (self.primitive, value) {
            (PrimitiveType::Bool, Value::Bool(b)) => Ok(b.to_string()),
            (PrimitiveType::I8, Value::I8(v)) => Ok(v.to_string()),
            (PrimitiveType::I16, Value::I16(v)) => Ok(v.to_string()),
            (PrimitiveType::I32, Value::I32(v)) => Ok(v.to_string()),
            (PrimitiveType::I64, Value::I64(v)) => Ok(v.to_string()),
            (PrimitiveType::F32, Value::F32(v)) => {
                self.encode_float(f64::from(*v), serde_json::to_string(v).map_err(Into::into))
            }
            (PrimitiveType::F64, Value::F64(v)) => {
                self.encode_float(*v, serde_json::to_string(v).map_err(Into::into))
            }
            (PrimitiveType::Char, Value::Char(c)) => quote(c.encode_utf8(&mut [0u8; 4])),
            (p, other) => Err(self.mismatch(p.name(), other.kind_name())),
        }
    }

    fn demarshall_value(
        &self,
        wire: &WireValue,
        _session: &MarshallingSession<'_>,
    ) -> Result<Value> {
        match self.primitive {
            PrimitiveType::Bool => wire
                .as_bool()
                .map(Value::Bool)
                .ok_or_else(|| self.mismatch("boolean", wire.kind_name())),
            PrimitiveType::I8 => Ok(Value::I8(self.narrow(self.read_integer(wire)?)?)),
            PrimitiveType::I16 => Ok(Value::I16(self.narrow(self.read_integer(wire)?)?)),
            PrimitiveType::I32 => Ok(Value::I32(self.narrow(self.read_integer(wire)?)?)),
            PrimitiveType::I64 => Ok(Value::I64(self.read_integer(wire)?)),
            PrimitiveType::F32 => {
                let v = wire
                    .as_f64()
                    .ok_or_else(|| self.mismatch("number", wire.kind_name()))?;
                let narrowed = v as f32;
                if narrowed.is_finite() {
                    Ok(Value::F32(narrowed))
                } else {
                    Err(self.mismatch("number in f32 range", v.to_string()))
                }
            }
            PrimitiveType::F64 => wire
                .as_f64()
                .map(Value::F64)
                .ok_or_else(|| self.mismatch("number", wire.kind_name())),
            PrimitiveType::Char => {
                let s = wire
                    .as_str()
                    .ok_or_else(|| self.mismatch("one-character string", wire.kind_name()))?;
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(self.mismatch("one-character string", format!("{s:?}"))),
                }
            }
        }
    }
}

/// Marshaller for UTF-8 strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringMarshaller;

impl StringMarshaller {
    /// Marshaller class name under which this marshaller is provided.
    pub const CLASS_NAME: &'static str = "StringMarshaller";
}

impl Marshaller for StringMarshaller {
    fn type_handled(&self) -> TypeRef {
        TypeRef::String
    }

    fn self_describing(&self) -> bool {
        true
    }

    fn marshall_value(&self, value: &Value, _session: &MarshallingSession<'_>) -> Result<String> {
        match value {
            Value::String(s) => quote(s),
            other => Err(MarshalError::mismatch("string", "string", other.kind_name())),
        }
    }

    fn demarshall_value(
        &self,
        wire: &WireValue,
        _session: &MarshallingSession<'_>,
    ) -> Result<Value> {
        wire.as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| MarshalError::mismatch("string", "string", wire.kind_name()))
    }
}
