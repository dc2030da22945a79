// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Marshalling session: resolves nested marshallers through the registry.
//!
//! Two dispatch modes exist. Declared-type dispatch ([`marshall_as`] /
//! [`demarshall_as`]) picks the marshaller from a field or component type and
//! applies the boxing rule. Tagged dispatch ([`marshall_tagged`] /
//! [`demarshall_tagged`]) picks it from the value's own wire type tag and is
//! what collections, maps and `any` use for every element.
//!
//! [`marshall_as`]: MarshallingSession::marshall_as
//! [`demarshall_as`]: MarshallingSession::demarshall_as
//! [`marshall_tagged`]: MarshallingSession::marshall_tagged
//! [`demarshall_tagged`]: MarshallingSession::demarshall_tagged

use std::sync::Arc;

use crate::core::{MarshalError, Result, TypeRef, Value};
use crate::wire::{wrap_tagged, WireValue, NULL_TOKEN, VALUE_KEY};

use super::Marshaller;

/// Lookup of marshallers by wire identifier.
pub trait MarshallerLookup: Send + Sync {
    /// Get the marshaller bound to `type_id`.
    fn lookup(&self, type_id: &str) -> Option<&Arc<dyn Marshaller>>;
}

/// Dispatch context handed to every marshaller call.
#[derive(Clone, Copy)]
pub struct MarshallingSession<'a> {
    lookup: &'a dyn MarshallerLookup,
}

impl std::fmt::Debug for MarshallingSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarshallingSession").finish_non_exhaustive()
    }
}

impl<'a> MarshallingSession<'a> {
    /// Create a session over a marshaller lookup.
    pub fn new(lookup: &'a dyn MarshallerLookup) -> Self {
        Self { lookup }
    }

    /// Get the marshaller bound to `type_id`, if any.
    pub fn marshaller(&self, type_id: &str) -> Option<&'a Arc<dyn Marshaller>> {
        self.lookup.lookup(type_id)
    }

    /// Get the marshaller bound to `type_id`, failing if it is absent.
    pub fn require(&self, type_id: &str, owner: &str) -> Result<&'a Arc<dyn Marshaller>> {
        self.marshaller(type_id)
            .ok_or_else(|| MarshalError::unknown_nested(owner, type_id))
    }

    /// Check whether `type_id` resolves to a marshaller handling `handled`.
    pub fn resolves_to(&self, type_id: &str, handled: &TypeRef) -> bool {
        self.marshaller(type_id)
            .is_some_and(|m| &m.type_handled() == handled)
    }

    /// Encode a value, dispatching on its runtime type.
    pub fn marshall_tagged(&self, value: &Value) -> Result<String> {
        let Some(type_id) = value.type_id() else {
            return Ok(NULL_TOKEN.to_string());
        };
        let marshaller = self.require(&type_id, "tagged element")?;
        let plain = marshaller.marshall(value, self)?;
        if marshaller.self_describing() {
            Ok(plain)
        } else {
            wrap_tagged(&type_id, &plain)
        }
    }

    /// Decode a wire value, dispatching on the type tag it carries.
    pub fn demarshall_tagged(&self, wire: &WireValue) -> Result<Value> {
        match wire {
            WireValue::Null => Ok(Value::Null),
            WireValue::Bool(b) => Ok(Value::Bool(*b)),
            WireValue::String(s) => Ok(Value::String(s.clone())),
            WireValue::Object(obj) => {
                let tag = obj.encoded_type().ok_or_else(|| {
                    MarshalError::mismatch("any", "tagged object", "untagged object")
                })?;
                let marshaller = self.require(tag, "tagged element")?;
                let payload = obj.get(VALUE_KEY).unwrap_or(wire);
                if !marshaller.handles(payload) {
                    return Err(MarshalError::mismatch(tag, tag, payload.kind_name()));
                }
                marshaller.demarshall(payload, self)
            }
            other => Err(MarshalError::mismatch(
                "any",
                "tagged value",
                other.kind_name(),
            )),
        }
    }

    /// Encode a value against a declared type.
    pub fn marshall_as(&self, declared: &TypeRef, value: &Value, owner: &str) -> Result<String> {
        if value.is_null() {
            if !declared.is_nullable() {
                return Err(MarshalError::mismatch(
                    format!("{owner}: {declared}"),
                    "non-null primitive",
                    "null",
                ));
            }
            return Ok(NULL_TOKEN.to_string());
        }

        match declared {
            TypeRef::Any => self.marshall_tagged(value),
            TypeRef::Named(name) => {
                self.check_assignable(name, value, owner)?;
                self.marshall_tagged(value)
            }
            _ => {
                let type_id = declared.type_id();
                self.require(&type_id, owner)?.marshall(value, self)
            }
        }
    }

    /// Decode a wire value against a declared type.
    ///
    /// Untagged wire text for a named type is decoded by the declared
    /// type's marshaller, so a bare enum constant name is accepted.
    pub fn demarshall_as(&self, declared: &TypeRef, wire: &WireValue, owner: &str) -> Result<Value> {
        if wire.is_null() {
            if !declared.is_nullable() {
                return Err(MarshalError::mismatch(
                    format!("{owner}: {declared}"),
                    "non-null primitive",
                    "null",
                ));
            }
            return Ok(Value::Null);
        }

        match declared {
            TypeRef::Any => self.demarshall_tagged(wire),
            TypeRef::Named(name) if !wire.is_tagged() => {
                self.require(name, owner)?.demarshall(wire, self)
            }
            TypeRef::Named(name) => {
                let value = self.demarshall_tagged(wire)?;
                self.check_assignable(name, &value, owner)?;
                Ok(value)
            }
            _ => {
                let type_id = declared.type_id();
                self.require(&type_id, owner)?.demarshall(wire, self)
            }
        }
    }

    /// A value is assignable to a declared name when both resolve to the
    /// same marshaller instance.
    fn check_assignable(&self, declared: &str, value: &Value, owner: &str) -> Result<()> {
        let Some(actual) = value.type_id() else {
            return Ok(());
        };
        let expected = self.require(declared, owner)?;
        let found = self.require(&actual, owner)?;
        if Arc::ptr_eq(expected, found) {
            Ok(())
        } else {
            Err(MarshalError::mismatch(
                format!("{owner}: {declared}"),
                declared,
                actual,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ObjectValue, PrimitiveType};
    use crate::marshal::testing::TestLookup;
    use crate::marshal::EnumMarshaller;

    fn lookup() -> TestLookup {
        TestLookup::builtins()
    }

    #[test]
    fn test_tagged_wraps_non_self_describing() {
        let lookup = lookup();
        let session = MarshallingSession::new(&lookup);
        assert_eq!(
            session.marshall_tagged(&Value::I32(7)).unwrap(),
            r#"{"^EncodedType":"i32","^Value":7}"#
        );
        assert_eq!(session.marshall_tagged(&Value::from("x")).unwrap(), "\"x\"");
        assert_eq!(session.marshall_tagged(&Value::Null).unwrap(), "null");
    }

    #[test]
    fn test_demarshall_tagged_unwraps() {
        let lookup = lookup();
        let session = MarshallingSession::new(&lookup);
        let wire = WireValue::parse(r#"{"^EncodedType":"i32","^Value":7}"#).unwrap();
        assert_eq!(session.demarshall_tagged(&wire).unwrap(), Value::I32(7));
    }

    #[test]
    fn test_demarshall_tagged_rejects_bare_number() {
        let lookup = lookup();
        let session = MarshallingSession::new(&lookup);
        let wire = WireValue::parse("7").unwrap();
        assert!(session.demarshall_tagged(&wire).is_err());
    }

    #[test]
    fn test_demarshall_tagged_unknown_tag() {
        let lookup = lookup();
        let session = MarshallingSession::new(&lookup);
        let wire = WireValue::parse(r#"{"^EncodedType":"Nope","^Value":1}"#).unwrap();
        let err = session.demarshall_tagged(&wire).unwrap_err();
        assert!(matches!(err, MarshalError::UnknownNestedMarshaller { .. }));
    }

    #[derive(Debug)]
    struct TextOnly;

    impl Marshaller for TextOnly {
        fn type_handled(&self) -> TypeRef {
            TypeRef::named("Text")
        }

        fn handles(&self, wire: &WireValue) -> bool {
            wire.as_str().is_some()
        }

        fn marshall_value(&self, _value: &Value, _session: &MarshallingSession<'_>) -> Result<String> {
            Ok("\"text\"".to_string())
        }

        fn demarshall_value(
            &self,
            wire: &WireValue,
            _session: &MarshallingSession<'_>,
        ) -> Result<Value> {
            Ok(Value::from(wire.as_str().unwrap_or_default()))
        }
    }

    #[test]
    fn test_demarshall_tagged_consults_handles() {
        let lookup = lookup().with("Text", TextOnly);
        let session = MarshallingSession::new(&lookup);

        let ok = WireValue::parse(r#"{"^EncodedType":"Text","^Value":"hi"}"#).unwrap();
        assert_eq!(session.demarshall_tagged(&ok).unwrap(), Value::from("hi"));

        let rejected = WireValue::parse(r#"{"^EncodedType":"Text","^Value":3}"#).unwrap();
        let err = session.demarshall_tagged(&rejected).unwrap_err();
        assert!(matches!(err, MarshalError::TypeMismatch { .. }));
    }

    /// Encodes `Amount` objects as a bare decimal string.
    #[derive(Debug)]
    struct AmountText;

    impl Marshaller for AmountText {
        fn type_handled(&self) -> TypeRef {
            TypeRef::named("Amount")
        }

        fn marshall_value(&self, value: &Value, _session: &MarshallingSession<'_>) -> Result<String> {
            let cents = value
                .as_object()
                .and_then(|o| o.get("cents"))
                .and_then(|v| match v {
                    Value::I64(c) => Some(*c),
                    _ => None,
                })
                .ok_or_else(|| MarshalError::mismatch("Amount", "cents", value.kind_name()))?;
            Ok(format!("\"{}.{:02}\"", cents / 100, cents % 100))
        }

        fn demarshall_value(
            &self,
            wire: &WireValue,
            _session: &MarshallingSession<'_>,
        ) -> Result<Value> {
            let text = wire
                .as_str()
                .ok_or_else(|| MarshalError::mismatch("Amount", "string", wire.kind_name()))?;
            let cents: i64 = text
                .replace('.', "")
                .parse()
                .map_err(|_| MarshalError::mismatch("Amount", "decimal", text))?;
            Ok(Value::Object(ObjectValue::new("Amount").with("cents", Value::I64(cents))))
        }
    }

    #[test]
    fn test_tagged_wraps_bare_output_of_object_type() {
        let lookup = lookup().with("Amount", AmountText);
        let session = MarshallingSession::new(&lookup);
        let amount = Value::Object(ObjectValue::new("Amount").with("cents", Value::I64(1250)));

        let text = session.marshall_tagged(&amount).unwrap();
        assert_eq!(text, r#"{"^EncodedType":"Amount","^Value":"12.50"}"#);

        let wire = WireValue::parse(&text).unwrap();
        assert_eq!(session.demarshall_tagged(&wire).unwrap(), amount);
    }

    #[test]
    fn test_boxing_rule() {
        let lookup = lookup();
        let session = MarshallingSession::new(&lookup);
        let primitive = TypeRef::Primitive(PrimitiveType::I32);
        let boxed = TypeRef::Boxed(PrimitiveType::I32);

        assert!(session.marshall_as(&primitive, &Value::Null, "T").is_err());
        assert_eq!(session.marshall_as(&boxed, &Value::Null, "T").unwrap(), "null");
        assert!(session
            .demarshall_as(&primitive, &WireValue::Null, "T")
            .is_err());
        assert_eq!(
            session.demarshall_as(&boxed, &WireValue::Null, "T").unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_declared_enum_accepts_bare_name() {
        let color = EnumMarshaller::new("Color", vec!["RED".into()]);
        let lookup = lookup().with("Color", color);
        let session = MarshallingSession::new(&lookup);
        let declared = TypeRef::named("Color");

        let bare = WireValue::parse(r#""RED""#).unwrap();
        assert_eq!(
            session.demarshall_as(&declared, &bare, "T.color").unwrap(),
            Value::enumeration("Color", "RED")
        );

        let unknown = WireValue::parse(r#""BLUE""#).unwrap();
        let err = session.demarshall_as(&declared, &unknown, "T.color").unwrap_err();
        assert!(matches!(err, MarshalError::UnknownEnumVariant { .. }));

        let foreign = WireValue::parse(r#"{"^EncodedType":"i32","^Value":1}"#).unwrap();
        assert!(session.demarshall_as(&declared, &foreign, "T.color").is_err());
    }

    #[test]
    fn test_resolves_to() {
        let lookup = lookup();
        let session = MarshallingSession::new(&lookup);
        let int = TypeRef::Primitive(PrimitiveType::I32);
        assert!(session.resolves_to("i32?", &int));
        assert!(!session.resolves_to("string", &int));
        assert!(!session.resolves_to("missing", &int));
    }
}
