// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Marshaller contract and the marshallers the factory can bind.
//!
//! - [`scalar`] - primitive and string marshallers
//! - [`collection`] - list/set marshallers sharing one generic base
//! - [`map`] - key/value marshaller
//! - [`enumeration`] - enum-by-name marshaller
//! - [`object`] - reflective field marshaller
//! - [`array`] - dimension-recursive array marshaller
//! - [`provider`] - explicit marshaller classes by name
//! - [`session`] - per-call dispatch through the registry

pub mod array;
pub mod collection;
pub mod enumeration;
pub mod map;
pub mod object;
pub mod provider;
pub mod scalar;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;

use crate::core::{Encoding, Result, TypeRef, Value};
use crate::wire::{WireValue, NULL_TOKEN};

pub use array::ArrayMarshaller;
pub use collection::{CollectionMarshaller, CollectionTarget, ListMarshaller, ListTarget, SetMarshaller, SetTarget};
pub use enumeration::EnumMarshaller;
pub use map::MapMarshaller;
pub use object::{FieldMapping, ObjectMarshaller};
pub use provider::{MarshallerProvider, MarshallerProviders};
pub use scalar::{ScalarMarshaller, StringMarshaller};
pub use session::{MarshallerLookup, MarshallingSession};

/// Converts values of one type to and from the wire representation.
///
/// Implementors supply [`marshall_value`](Marshaller::marshall_value) and
/// [`demarshall_value`](Marshaller::demarshall_value); the provided
/// [`marshall`](Marshaller::marshall) and [`demarshall`](Marshaller::demarshall)
/// short-circuit null before delegating, so implementations never see it.
pub trait Marshaller: Send + Sync + fmt::Debug {
    /// Type handled by this marshaller.
    ///
    /// Array marshallers report their base component type.
    fn type_handled(&self) -> TypeRef;

    /// Wire format tag.
    fn encoding_type(&self) -> Encoding {
        Encoding::Json
    }

    /// Encode a value to wire text.
    fn marshall(&self, value: &Value, session: &MarshallingSession<'_>) -> Result<String> {
        if value.is_null() {
            return Ok(NULL_TOKEN.to_string());
        }
        self.marshall_value(value, session)
    }

    /// Decode a wire value.
    fn demarshall(&self, wire: &WireValue, session: &MarshallingSession<'_>) -> Result<Value> {
        if wire.is_null() {
            return Ok(Value::Null);
        }
        self.demarshall_value(wire, session)
    }

    /// Whether this marshaller accepts `wire`; consulted by tagged dispatch
    /// before decoding.
    fn handles(&self, _wire: &WireValue) -> bool {
        true
    }

    /// Whether the wire text this marshaller emits identifies its own type.
    ///
    /// Tagged dispatch wraps the output of every other marshaller in
    /// `{"^EncodedType":..,"^Value":..}`.
    fn self_describing(&self) -> bool {
        false
    }

    /// Encode a non-null value.
    fn marshall_value(&self, value: &Value, session: &MarshallingSession<'_>) -> Result<String>;

    /// Decode a non-null wire value.
    fn demarshall_value(&self, wire: &WireValue, session: &MarshallingSession<'_>)
        -> Result<Value>;
}
