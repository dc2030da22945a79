// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Synthesized array marshaller.
//!
//! One marshaller handles every dimension of a signature: the outermost
//! dimension recurses into the next until dimension one, whose elements are
//! handed to the component's marshaller with the boxing rule applied.
//! Intermediate sub-arrays may be null.

use crate::core::{ArraySignature, ArrayValue, MarshalError, Result, TypeRef, Value};
use crate::wire::{ArrayWriter, WireValue, NULL_TOKEN};

use super::{Marshaller, MarshallingSession};

/// Marshaller for one array signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayMarshaller {
    signature: ArraySignature,
}

impl ArrayMarshaller {
    /// Create a marshaller for `signature`.
    pub fn new(signature: ArraySignature) -> Self {
        Self { signature }
    }

    /// Array shape handled.
    pub fn signature(&self) -> &ArraySignature {
        &self.signature
    }

    /// Signature of the sub-array at `dim` remaining dimensions.
    fn signature_at(&self, dim: usize) -> ArraySignature {
        ArraySignature::new(self.signature.component().clone(), dim)
    }

    fn marshall_dimension(
        &self,
        dim: usize,
        value: &ArrayValue,
        session: &MarshallingSession<'_>,
    ) -> Result<String> {
        let expected = self.signature_at(dim);
        if value.signature != expected {
            return Err(MarshalError::mismatch(
                expected.type_id(),
                expected.type_id(),
                value.signature.type_id(),
            ));
        }

        let owner = expected.type_id();
        let mut writer = ArrayWriter::new();
        for item in &value.items {
            if dim == 1 {
                writer.push(&session.marshall_as(self.signature.component(), item, &owner)?);
                continue;
            }
            match item {
                Value::Null => writer.push(NULL_TOKEN),
                Value::Array(sub) => writer.push(&self.marshall_dimension(dim - 1, sub, session)?),
                other => {
                    return Err(MarshalError::mismatch(owner, "array", other.kind_name()));
                }
            }
        }
        Ok(writer.finish())
    }

    fn demarshall_dimension(
        &self,
        dim: usize,
        wire: &WireValue,
        session: &MarshallingSession<'_>,
    ) -> Result<ArrayValue> {
        let signature = self.signature_at(dim);
        let owner = signature.type_id();
        let array = wire.expect_array(&owner)?;

        let mut items = Vec::with_capacity(array.size());
        for element in array {
            let item = if dim == 1 {
                session.demarshall_as(self.signature.component(), element, &owner)?
            } else if element.is_null() {
                Value::Null
            } else {
                Value::Array(self.demarshall_dimension(dim - 1, element, session)?)
            };
            items.push(item);
        }
        Ok(ArrayValue::new(signature, items))
    }
}

impl Marshaller for ArrayMarshaller {
    /// Base component type; the dimension count lives in the signature.
    fn type_handled(&self) -> TypeRef {
        self.signature.component().clone()
    }

    fn marshall_value(&self, value: &Value, session: &MarshallingSession<'_>) -> Result<String> {
        let Value::Array(array) = value else {
            return Err(MarshalError::mismatch(
                self.signature.type_id(),
                "array",
                value.kind_name(),
            ));
        };
        self.marshall_dimension(self.signature.dimensions, array, session)
    }

    fn demarshall_value(
        &self,
        wire: &WireValue,
        session: &MarshallingSession<'_>,
    ) -> Result<Value> {
        Ok(Value::Array(self.demarshall_dimension(
            self.signature.dimensions,
            wire,
            session,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PrimitiveType;
    use crate::marshal::testing::TestLookup;

    fn int_sig(dimensions: usize) -> ArraySignature {
        ArraySignature::new(TypeRef::Primitive(PrimitiveType::I32), dimensions)
    }

    #[test]
    fn test_two_dimensional_round_trip() {
        let lookup = TestLookup::builtins();
        let session = MarshallingSession::new(&lookup);
        let m = ArrayMarshaller::new(int_sig(2));

        let wire = WireValue::parse("[[1,2],[3]]").unwrap();
        let value = m.demarshall(&wire, &session).unwrap();
        let expected = Value::array(
            int_sig(2),
            vec![
                Value::array(int_sig(1), vec![Value::I32(1), Value::I32(2)]),
                Value::array(int_sig(1), vec![Value::I32(3)]),
            ],
        );
        assert_eq!(value, expected);
        assert_eq!(m.marshall(&value, &session).unwrap(), "[[1,2],[3]]");
    }

    #[test]
    fn test_null_sub_array() {
        let lookup = TestLookup::builtins();
        let session = MarshallingSession::new(&lookup);
        let m = ArrayMarshaller::new(int_sig(2));
        let wire = WireValue::parse("[null,[]]").unwrap();
        let value = m.demarshall(&wire, &session).unwrap();
        assert_eq!(value.as_array().unwrap().items[0], Value::Null);
        assert_eq!(m.marshall(&value, &session).unwrap(), "[null,[]]");
    }

    #[test]
    fn test_boxing_at_innermost_dimension() {
        let lookup = TestLookup::builtins();
        let session = MarshallingSession::new(&lookup);
        let wire = WireValue::parse("[1,null]").unwrap();

        let primitive = ArrayMarshaller::new(int_sig(1));
        assert!(primitive.demarshall(&wire, &session).is_err());

        let boxed = ArrayMarshaller::new(ArraySignature::new(
            TypeRef::Boxed(PrimitiveType::I32),
            1,
        ));
        let value = boxed.demarshall(&wire, &session).unwrap();
        assert_eq!(value.as_array().unwrap().items, vec![Value::I32(1), Value::Null]);
    }

    #[test]
    fn test_string_separators() {
        let lookup = TestLookup::builtins();
        let session = MarshallingSession::new(&lookup);
        let sig = ArraySignature::new(TypeRef::String, 1);
        let value = Value::array(
            sig.clone(),
            vec![Value::from("a"), Value::from("b"), Value::from("c")],
        );
        assert_eq!(
            ArrayMarshaller::new(sig).marshall(&value, &session).unwrap(),
            r#"["a","b","c"]"#
        );
    }

    #[test]
    fn test_wrong_signature_rejected() {
        let lookup = TestLookup::builtins();
        let session = MarshallingSession::new(&lookup);
        let value = Value::array(int_sig(1), vec![Value::I32(1)]);
        assert!(ArrayMarshaller::new(int_sig(2))
            .marshall(&value, &session)
            .is_err());
    }

    #[test]
    fn test_type_handled_is_component() {
        let m = ArrayMarshaller::new(int_sig(3));
        assert_eq!(m.type_handled(), TypeRef::Primitive(PrimitiveType::I32));
    }
}
