// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Enum marshaller.
//!
//! Constants travel by name:
//! `{"^EncodedType":"Color","^EnumStringValue":"RED"}`.

use crate::core::{MarshalError, Result, TypeRef, Value};
use crate::wire::{quote, ObjectWriter, WireValue, ENUM_VALUE_KEY};

use super::{Marshaller, MarshallingSession};

/// Marshaller for one enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMarshaller {
    type_name: String,
    variants: Vec<String>,
}

impl EnumMarshaller {
    /// Create a marshaller for `type_name` with its declared constants.
    pub fn new(type_name: impl Into<String>, variants: Vec<String>) -> Self {
        Self {
            type_name: type_name.into(),
            variants,
        }
    }

    /// Canonical enum type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Declared constants, in declaration order.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    fn check_variant(&self, variant: &str) -> Result<()> {
        if self.variants.iter().any(|v| v == variant) {
            Ok(())
        } else {
            Err(MarshalError::unknown_variant(&self.type_name, variant))
        }
    }

    fn accepts_tag(&self, tag: &str, session: &MarshallingSession<'_>) -> bool {
        tag == self.type_name || session.resolves_to(tag, &self.type_handled())
    }
}

impl Marshaller for EnumMarshaller {
    fn type_handled(&self) -> TypeRef {
        TypeRef::named(&self.type_name)
    }

    fn self_describing(&self) -> bool {
        true
    }

    fn marshall_value(&self, value: &Value, session: &MarshallingSession<'_>) -> Result<String> {
        let Value::Enum(e) = value else {
            return Err(MarshalError::mismatch(
                &self.type_name,
                "enum",
                value.kind_name(),
            ));
        };
        if !self.accepts_tag(&e.type_name, session) {
            return Err(MarshalError::mismatch(
                &self.type_name,
                &self.type_name,
                &e.type_name,
            ));
        }
        self.check_variant(&e.variant)?;

        let mut writer = ObjectWriter::tagged(&e.type_name)?;
        writer.entry(ENUM_VALUE_KEY, &quote(&e.variant)?)?;
        Ok(writer.finish())
    }

    fn demarshall_value(
        &self,
        wire: &WireValue,
        session: &MarshallingSession<'_>,
    ) -> Result<Value> {
        // A bare constant name is accepted where the declared type fixes the enum.
        if let Some(variant) = wire.as_str() {
            self.check_variant(variant)?;
            return Ok(Value::enumeration(&self.type_name, variant));
        }

        let obj = wire.expect_object(&self.type_name)?;
        let tag = match obj.encoded_type() {
            Some(tag) if self.accepts_tag(tag, session) => tag,
            Some(tag) => {
                return Err(MarshalError::mismatch(&self.type_name, &self.type_name, tag))
            }
            None => &self.type_name,
        };
        let variant = obj
            .get(ENUM_VALUE_KEY)
            .and_then(WireValue::as_str)
            .ok_or_else(|| {
                MarshalError::mismatch(&self.type_name, "enum constant name", "missing")
            })?;
        self.check_variant(variant)?;
        Ok(Value::enumeration(tag, variant))
    }
}
