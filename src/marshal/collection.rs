// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Collection marshallers.
//!
//! Every collection marshaller is a [`CollectionMarshaller`] over a
//! [`CollectionTarget`] that fixes the concrete container. Elements are
//! dynamically typed: each one is encoded and decoded through the session's
//! tagged dispatch, never through a declared element type.

use std::fmt;
use std::marker::PhantomData;

use crate::core::{ArraySignature, ArrayValue, MarshalError, Result, TypeRef, Value};
use crate::wire::{ArrayWriter, WireArray, WireValue};

use super::{Marshaller, MarshallingSession};

/// Concrete container populated by a collection marshaller.
pub trait CollectionTarget: Send + Sync + 'static {
    /// Marshaller class name under which the collection marshaller is provided.
    const CLASS_NAME: &'static str;

    /// Type handled by the collection marshaller.
    fn type_handled() -> TypeRef;

    /// Create an empty container sized for `capacity` elements.
    fn with_capacity(capacity: usize) -> Self;

    /// Add one decoded element.
    fn add(&mut self, value: Value);

    /// Finish into a value.
    fn into_value(self) -> Value;

    /// Elements of a value of this collection type.
    fn elements(value: &Value) -> Option<&[Value]>;
}

/// Growable ordered list.
#[derive(Debug, Default)]
pub struct ListTarget(Vec<Value>);

impl CollectionTarget for ListTarget {
    const CLASS_NAME: &'static str = "ListMarshaller";

    fn type_handled() -> TypeRef {
        TypeRef::List
    }

    fn with_capacity(capacity: usize) -> Self {
        ListTarget(Vec::with_capacity(capacity))
    }

    fn add(&mut self, value: Value) {
        self.0.push(value);
    }

    fn into_value(self) -> Value {
        Value::List(self.0)
    }

    fn elements(value: &Value) -> Option<&[Value]> {
        match value {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Insertion-ordered set; repeated elements are dropped.
#[derive(Debug, Default)]
pub struct SetTarget(Vec<Value>);

impl CollectionTarget for SetTarget {
    const CLASS_NAME: &'static str = "SetMarshaller";

    fn type_handled() -> TypeRef {
        TypeRef::Set
    }

    fn with_capacity(capacity: usize) -> Self {
        SetTarget(Vec::with_capacity(capacity))
    }

    fn add(&mut self, value: Value) {
        if !self.0.contains(&value) {
            self.0.push(value);
        }
    }

    fn into_value(self) -> Value {
        Value::Set(self.0)
    }

    fn elements(value: &Value) -> Option<&[Value]> {
        match value {
            Value::Set(items) => Some(items),
            _ => None,
        }
    }
}

/// Shared base of all collection marshallers.
pub struct CollectionMarshaller<C> {
    _target: PhantomData<fn() -> C>,
}

/// Marshaller for [`Value::List`].
pub type ListMarshaller = CollectionMarshaller<ListTarget>;

/// Marshaller for [`Value::Set`].
pub type SetMarshaller = CollectionMarshaller<SetTarget>;

impl<C: CollectionTarget> CollectionMarshaller<C> {
    /// Create a collection marshaller.
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }

    /// Zero-length array of the contained type, for bulk APIs.
    pub fn empty_array(&self) -> ArrayValue {
        ArrayValue::empty(ArraySignature::new(C::type_handled(), 1))
    }

    /// Populate `target` element by element from `wire`.
    pub fn do_demarshall(
        &self,
        mut target: C,
        wire: &WireArray,
        session: &MarshallingSession<'_>,
    ) -> Result<Value> {
        for element in wire {
            target.add(session.demarshall_tagged(element)?);
        }
        Ok(target.into_value())
    }
}

impl<C: CollectionTarget> Default for CollectionMarshaller<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for CollectionMarshaller<C>
where
    C: CollectionTarget,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionMarshaller")
            .field("class", &C::CLASS_NAME)
            .finish()
    }
}

impl<C: CollectionTarget> Marshaller for CollectionMarshaller<C> {
    fn type_handled(&self) -> TypeRef {
        C::type_handled()
    }

    fn marshall_value(&self, value: &Value, session: &MarshallingSession<'_>) -> Result<String> {
        let type_id = C::type_handled().type_id();
        let elements = C::elements(value)
            .ok_or_else(|| MarshalError::mismatch(&type_id, &type_id, value.kind_name()))?;

        let mut writer = ArrayWriter::new();
        for element in elements {
            writer.push(&session.marshall_tagged(element)?);
        }
        Ok(writer.finish())
    }

    fn demarshall_value(
        &self,
        wire: &WireValue,
        session: &MarshallingSession<'_>,
    ) -> Result<Value> {
        let array = wire.expect_array(&C::type_handled().type_id())?;
        self.do_demarshall(C::with_capacity(array.size()), array, session)
    }
}
