// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-run generation state.

use std::collections::HashSet;

use crate::core::{MarshalError, Result, TypeRef};
use crate::marshal::MarshallerProviders;
use crate::schema::TypeCatalog;

use super::{ArraySynthesizer, FactoryPlan, PlanBuilder};

/// State shared by the strategies and the array synthesizer during one
/// generation pass. Created fresh for every pass and never reused.
#[derive(Debug)]
pub struct GeneratorContext<'a> {
    catalog: &'a TypeCatalog,
    providers: &'a MarshallerProviders,
    known: HashSet<String>,
    plan: PlanBuilder,
}

impl<'a> GeneratorContext<'a> {
    /// Create an empty context.
    pub fn new(catalog: &'a TypeCatalog, providers: &'a MarshallerProviders) -> Self {
        Self {
            catalog,
            providers,
            known: HashSet::new(),
            plan: PlanBuilder::new(),
        }
    }

    /// Catalog being generated.
    pub fn catalog(&self) -> &'a TypeCatalog {
        self.catalog
    }

    /// Explicit marshaller classes.
    pub fn providers(&self) -> &'a MarshallerProviders {
        self.providers
    }

    /// Plan built so far.
    pub fn plan(&self) -> &PlanBuilder {
        &self.plan
    }

    /// Mutable access to the plan.
    pub fn plan_mut(&mut self) -> &mut PlanBuilder {
        &mut self.plan
    }

    /// Record that a marshaller will be generated for `type_id`.
    pub fn register_generated(&mut self, type_id: impl Into<String>) {
        self.known.insert(type_id.into());
    }

    /// Whether `type_id` has (or will have) a marshaller in this pass.
    pub fn is_known(&self, type_id: &str) -> bool {
        self.known.contains(type_id) || self.plan.binding(type_id).is_some()
    }

    /// Check that values declared as `ty` can be marshalled, synthesizing
    /// array marshallers as needed.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::UnknownNestedMarshaller`] naming `owner` if
    /// `ty` (or an array's component) has no marshaller.
    pub fn ensure_resolvable(&mut self, ty: &TypeRef, owner: &str) -> Result<()> {
        match ty {
            TypeRef::Any => Ok(()),
            TypeRef::Array(signature) => {
                ArraySynthesizer::add_array_marshaller(self, signature, owner).map(|_| ())
            }
            other => {
                let type_id = other.type_id();
                if self.is_known(&type_id) {
                    Ok(())
                } else {
                    Err(MarshalError::unknown_nested(owner, type_id))
                }
            }
        }
    }

    /// Finish the pass into a plan.
    pub fn into_plan(self, package: &str, class_name: &str) -> FactoryPlan {
        self.plan.finish(package, class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PrimitiveType;

    #[test]
    fn test_ensure_resolvable() {
        let catalog = TypeCatalog::new();
        let providers = MarshallerProviders::new();
        let mut ctx = GeneratorContext::new(&catalog, &providers);
        ctx.register_generated("i32");
        ctx.register_generated("Person");

        ctx.ensure_resolvable(&TypeRef::Primitive(PrimitiveType::I32), "T").unwrap();
        ctx.ensure_resolvable(&TypeRef::named("Person"), "T").unwrap();
        ctx.ensure_resolvable(&TypeRef::Any, "T").unwrap();
        assert!(ctx.ensure_resolvable(&TypeRef::String, "T").is_err());
    }

    #[test]
    fn test_synthesized_arrays_become_known() {
        let catalog = TypeCatalog::new();
        let providers = MarshallerProviders::new();
        let mut ctx = GeneratorContext::new(&catalog, &providers);
        ctx.register_generated("i64");

        let ty = TypeRef::Primitive(PrimitiveType::I64).array_of(1);
        assert!(!ctx.is_known("i64[]"));
        ctx.ensure_resolvable(&ty, "T").unwrap();
        assert!(ctx.is_known("i64[]"));
    }
}
