// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Reflective object marshaller.
//!
//! Readable fields are written after the type tag, in declaration order.
//! Writable fields are read back; a field absent from the wire decodes to
//! null (or fails, for a non-null primitive).

use serde::{Deserialize, Serialize};

use crate::core::{MarshalError, ObjectValue, Result, TypeRef, Value};
use crate::wire::{ObjectWriter, WireValue};

use super::{Marshaller, MarshallingSession};

fn default_true() -> bool {
    true
}

/// One field of a reflectively mapped type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Field name
    pub name: String,
    /// Declared field type
    #[serde(rename = "type")]
    pub declared: TypeRef,
    /// Field is written when marshalling
    #[serde(default = "default_true")]
    pub readable: bool,
    /// Field is populated when demarshalling
    #[serde(default = "default_true")]
    pub writable: bool,
}

impl FieldMapping {
    /// Create a readable and writable field.
    pub fn new(name: impl Into<String>, declared: TypeRef) -> Self {
        Self {
            name: name.into(),
            declared,
            readable: true,
            writable: true,
        }
    }

    /// Mark the field as read-only (never populated on decode).
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Mark the field as write-only (never emitted on encode).
    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }
}

/// Marshaller for an object type mapped field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMarshaller {
    type_name: String,
    fields: Vec<FieldMapping>,
}

impl ObjectMarshaller {
    /// Create a marshaller for `type_name` over its field mappings.
    pub fn new(type_name: impl Into<String>, fields: Vec<FieldMapping>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Canonical type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Field mappings, in declaration order.
    pub fn fields(&self) -> &[FieldMapping] {
        &self.fields
    }

    fn owner(&self, field: &FieldMapping) -> String {
        format!("{}.{}", self.type_name, field.name)
    }

    fn accepts_tag(&self, tag: &str, session: &MarshallingSession<'_>) -> bool {
        tag == self.type_name || session.resolves_to(tag, &self.type_handled())
    }
}

impl Marshaller for ObjectMarshaller {
    fn type_handled(&self) -> TypeRef {
        TypeRef::named(&self.type_name)
    }

    fn self_describing(&self) -> bool {
        true
    }

    fn marshall_value(&self, value: &Value, session: &MarshallingSession<'_>) -> Result<String> {
        let Value::Object(obj) = value else {
            return Err(MarshalError::mismatch(
                &self.type_name,
                "object",
                value.kind_name(),
            ));
        };
        if !self.accepts_tag(&obj.type_name, session) {
            return Err(MarshalError::mismatch(
                &self.type_name,
                &self.type_name,
                &obj.type_name,
            ));
        }
        if let Some(unknown) = obj
            .fields
            .keys()
            .find(|k| !self.fields.iter().any(|f| &f.name == *k))
        {
            return Err(MarshalError::mismatch(
                &self.type_name,
                "declared field",
                format!("unknown field '{unknown}'"),
            ));
        }

        let mut writer = ObjectWriter::tagged(&obj.type_name)?;
        for field in self.fields.iter().filter(|f| f.readable) {
            let field_value = obj.get(&field.name).unwrap_or(&Value::Null);
            let encoded = session.marshall_as(&field.declared, field_value, &self.owner(field))?;
            writer.entry(&field.name, &encoded)?;
        }
        Ok(writer.finish())
    }

    fn demarshall_value(
        &self,
        wire: &WireValue,
        session: &MarshallingSession<'_>,
    ) -> Result<Value> {
        let wire_obj = wire.expect_object(&self.type_name)?;
        let type_name = match wire_obj.encoded_type() {
            Some(tag) if self.accepts_tag(tag, session) => tag,
            Some(tag) => {
                return Err(MarshalError::mismatch(&self.type_name, &self.type_name, tag))
            }
            None => &self.type_name,
        };

        let mut obj = ObjectValue::new(type_name);
        for field in self.fields.iter().filter(|f| f.writable) {
            let field_wire = wire_obj.get(&field.name).unwrap_or(&WireValue::Null);
            let decoded = session.demarshall_as(&field.declared, field_wire, &self.owner(field))?;
            obj.set(&field.name, decoded);
        }
        Ok(Value::Object(obj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PrimitiveType;
    use crate::marshal::testing::TestLookup;

    fn address() -> ObjectMarshaller {
        ObjectMarshaller::new(
            "Address",
            vec![FieldMapping::new("city", TypeRef::String)],
        )
    }

    fn person() -> ObjectMarshaller {
        ObjectMarshaller::new(
            "Person",
            vec![
                FieldMapping::new("name", TypeRef::String),
                FieldMapping::new("age", TypeRef::Primitive(PrimitiveType::I32)),
                FieldMapping::new("nickname", TypeRef::Boxed(PrimitiveType::I32)),
                FieldMapping::new("home", TypeRef::named("Address")),
                FieldMapping::new("extra", TypeRef::Any),
            ],
        )
    }

    fn lookup() -> TestLookup {
        TestLookup::builtins()
            .with("Address", address())
            .with("Person", person())
            .alias("Employee", "Person")
    }

    fn ada() -> ObjectValue {
        ObjectValue::new("Person")
            .with("name", "Ada")
            .with("age", 36)
            .with("nickname", Value::Null)
            .with("home", ObjectValue::new("Address").with("city", "London"))
            .with("extra", Value::I64(7))
    }

    #[test]
    fn test_object_round_trip() {
        let lookup = lookup();
        let session = MarshallingSession::new(&lookup);
        let value = Value::Object(ada());

        let text = person().marshall(&value, &session).unwrap();
        assert_eq!(
            text,
            concat!(
                r#"{"^EncodedType":"Person","name":"Ada","age":36,"nickname":null,"#,
                r#""home":{"^EncodedType":"Address","city":"London"},"#,
                r#""extra":{"^EncodedType":"i64","^Value":7}}"#
            )
        );
        let wire = WireValue::parse(&text).unwrap();
        assert_eq!(person().demarshall(&wire, &session).unwrap(), value);
    }

    #[test]
    fn test_null_primitive_field_rejected() {
        let lookup = lookup();
        let session = MarshallingSession::new(&lookup);
        let mut obj = ada();
        obj.set("age", Value::Null);
        assert!(person().marshall(&Value::Object(obj), &session).is_err());
    }

    #[test]
    fn test_missing_boxed_field_decodes_null() {
        let lookup = lookup();
        let session = MarshallingSession::new(&lookup);
        let wire = WireValue::parse(
            r#"{"^EncodedType":"Person","name":"Ada","age":1,"home":null,"extra":null}"#,
        )
        .unwrap();
        let value = person().demarshall(&wire, &session).unwrap();
        assert_eq!(value.as_object().unwrap().get("nickname"), Some(&Value::Null));
    }

    #[test]
    fn test_alias_tag_accepted() {
        let lookup = lookup();
        let session = MarshallingSession::new(&lookup);
        let mut obj = ada();
        obj.type_name = "Employee".into();
        let text = person().marshall(&Value::Object(obj.clone()), &session).unwrap();
        assert!(text.starts_with(r#"{"^EncodedType":"Employee""#));
        let wire = WireValue::parse(&text).unwrap();
        assert_eq!(person().demarshall(&wire, &session).unwrap(), Value::Object(obj));
    }

    #[test]
    fn test_wrong_nested_type_rejected() {
        let lookup = lookup();
        let session = MarshallingSession::new(&lookup);
        let mut obj = ada();
        obj.set("home", Value::Object(ada()));
        let err = person().marshall(&Value::Object(obj), &session).unwrap_err();
        assert!(matches!(err, MarshalError::TypeMismatch { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let lookup = lookup();
        let session = MarshallingSession::new(&lookup);
        let obj = ada().with("shoe_size", 9);
        assert!(person().marshall(&Value::Object(obj), &session).is_err());
    }

    #[test]
    fn test_read_only_field_not_populated() {
        let lookup = TestLookup::builtins();
        let session = MarshallingSession::new(&lookup);
        let m = ObjectMarshaller::new(
            "Stamp",
            vec![
                FieldMapping::new("id", TypeRef::String).read_only(),
                FieldMapping::new("secret", TypeRef::String).write_only(),
            ],
        );
        let value = Value::Object(ObjectValue::new("Stamp").with("id", "x").with("secret", "s"));
        let text = m.marshall(&value, &session).unwrap();
        assert_eq!(text, r#"{"^EncodedType":"Stamp","id":"x"}"#);

        let wire = WireValue::parse(r#"{"^EncodedType":"Stamp","id":"x","secret":"s"}"#).unwrap();
        let decoded = m.demarshall(&wire, &session).unwrap();
        assert_eq!(decoded.as_object().unwrap().get("id"), None);
        assert_eq!(decoded.as_object().unwrap().get("secret"), Some(&Value::from("s")));
    }

    #[test]
    fn test_field_mapping_serde_defaults() {
        let field: FieldMapping = serde_json::from_str(r#"{"name":"tags","type":"string[]"}"#).unwrap();
        assert!(field.readable && field.writable);
        assert_eq!(field.declared, TypeRef::String.array_of(1));
    }
}
