// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-crate test lookup, built by hand without running the generator.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::PrimitiveType;

use super::{
    ListMarshaller, MapMarshaller, Marshaller, MarshallerLookup, ScalarMarshaller, SetMarshaller,
    StringMarshaller,
};

#[derive(Default)]
pub(crate) struct TestLookup(HashMap<String, Arc<dyn Marshaller>>);

impl TestLookup {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Scalars (plus boxed aliases), string, list, set and map.
    pub(crate) fn builtins() -> Self {
        let mut lookup = Self::new();
        for p in PrimitiveType::ALL {
            lookup = lookup
                .with(p.name(), ScalarMarshaller::new(p))
                .alias(&p.boxed_name(), p.name());
        }
        lookup
            .with("string", StringMarshaller)
            .with("list", ListMarshaller::new())
            .with("set", SetMarshaller::new())
            .with("map", MapMarshaller)
    }

    pub(crate) fn with(mut self, type_id: &str, marshaller: impl Marshaller + 'static) -> Self {
        self.0.insert(type_id.to_string(), Arc::new(marshaller));
        self
    }

    pub(crate) fn alias(mut self, alias: &str, target: &str) -> Self {
        if let Some(m) = self.0.get(target).cloned() {
            self.0.insert(alias.to_string(), m);
        }
        self
    }
}

impl MarshallerLookup for TestLookup {
    fn lookup(&self, type_id: &str) -> Option<&Arc<dyn Marshaller>> {
        self.0.get(type_id)
    }
}
