// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Map marshaller. Entries travel as `[key, value]` pairs, both tagged.

use crate::core::{MarshalError, Result, TypeRef, Value};
use crate::wire::{ArrayWriter, WireValue};

use super::{Marshaller, MarshallingSession};

/// Marshaller for [`Value::Map`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapMarshaller;

impl MapMarshaller {
    /// Marshaller class name under which this marshaller is provided.
    pub const CLASS_NAME: &'static str = "MapMarshaller";
}

impl Marshaller for MapMarshaller {
    fn type_handled(&self) -> TypeRef {
        TypeRef::Map
    }

    fn marshall_value(&self, value: &Value, session: &MarshallingSession<'_>) -> Result<String> {
        let Value::Map(entries) = value else {
            return Err(MarshalError::mismatch("map", "map", value.kind_name()));
        };

        let mut writer = ArrayWriter::new();
        for (key, val) in entries {
            let mut pair = ArrayWriter::new();
            pair.push(&session.marshall_tagged(key)?);
            pair.push(&session.marshall_tagged(val)?);
            writer.push(&pair.finish());
        }
        Ok(writer.finish())
    }

    fn demarshall_value(
        &self,
        wire: &WireValue,
        session: &MarshallingSession<'_>,
    ) -> Result<Value> {
        let array = wire.expect_array("map")?;
        let mut entries: Vec<(Value, Value)> = Vec::with_capacity(array.size());

        for entry in array {
            let pair = entry.expect_array("map entry")?;
            let (Some(key), Some(val), 2) = (pair.get(0), pair.get(1), pair.size()) else {
                return Err(MarshalError::mismatch(
                    "map entry",
                    "[key, value] pair",
                    format!("array of {}", pair.size()),
                ));
            };
            let key = session.demarshall_tagged(key)?;
            let val = session.demarshall_tagged(val)?;

            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = val,
                None => entries.push((key, val)),
            }
        }

        Ok(Value::Map(entries))
    }
}
