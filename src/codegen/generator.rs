// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Marshaller factory generator.

use std::time::Instant;

use tracing::{debug, info};

use crate::core::types::escape_ident;
use crate::core::{ArraySignature, MarshalError, Result, TypeRef};
use crate::marshal::MarshallerProviders;
use crate::registry::MarshallerFactory;
use crate::schema::{ExposedType, Fingerprint, TypeCatalog, TypeShape};

use super::{select_strategy, ArraySynthesizer, FactoryPlan, GeneratorContext, MappingStrategy};

fn is_enum(ty: &ExposedType) -> bool {
    matches!(ty.shape, TypeShape::Enum { .. })
}

/// Generates a marshaller factory for every type in a catalog.
#[derive(Debug)]
pub struct FactoryGenerator {
    catalog: TypeCatalog,
    providers: MarshallerProviders,
}

impl FactoryGenerator {
    /// Create a generator using the built-in marshaller classes.
    pub fn new(catalog: TypeCatalog) -> Self {
        Self::with_providers(catalog, MarshallerProviders::builtin())
    }

    /// Create a generator with a custom set of marshaller classes.
    pub fn with_providers(catalog: TypeCatalog, providers: MarshallerProviders) -> Self {
        Self { catalog, providers }
    }

    /// Catalog being generated.
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Marshaller classes available to explicit mappings.
    pub fn providers(&self) -> &MarshallerProviders {
        &self.providers
    }

    /// Fingerprint of everything generation depends on: the catalog, the
    /// available marshaller classes and the target name.
    pub fn fingerprint(&self, package: &str, class_name: &str) -> Result<Fingerprint> {
        self.catalog
            .fingerprint(&self.providers.names(), package, class_name)
    }

    /// Build the factory plan.
    ///
    /// Types are processed in name order so the plan does not depend on
    /// declaration order. Explicit marshallers come first, then enums, then
    /// everything else; a catch-all `any[]` marshaller is always added.
    ///
    /// # Errors
    ///
    /// Any catalog problem, unresolvable type, unknown marshaller class or
    /// duplicate binding aborts the whole pass.
    pub fn build_plan(&self, package: &str, class_name: &str) -> Result<FactoryPlan> {
        let start = Instant::now();
        info!(package = %package, class = %class_name, "Generating marshaller factory");
        self.catalog.validate()?;

        let catalog = self.catalog.canonicalized();
        let mut ctx = GeneratorContext::new(&catalog, &self.providers);
        for ty in &catalog.types {
            ctx.register_generated(&ty.name);
        }
        for alias in catalog.aliases.keys() {
            ctx.register_generated(alias);
        }

        let explicit = catalog.types.iter().filter(|t| t.marshaller.is_some());
        let enums = catalog
            .types
            .iter()
            .filter(|t| t.marshaller.is_none() && is_enum(t));
        let rest = catalog
            .types
            .iter()
            .filter(|t| t.marshaller.is_none() && !is_enum(t));

        for ty in explicit.chain(enums).chain(rest) {
            self.add_type(&mut ctx, &catalog, ty)?;
        }

        let catch_all = ArraySignature::new(TypeRef::Any, 1);
        ArraySynthesizer::add_array_marshaller(&mut ctx, &catch_all, &catch_all.type_id())?;

        let plan = ctx.into_plan(package, class_name);
        info!(
            factory = %plan.qualified_name(),
            types = catalog.len(),
            marshallers = plan.marshallers.len(),
            bindings = plan.bindings.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Generated marshaller factory"
        );
        Ok(plan)
    }

    fn add_type(
        &self,
        ctx: &mut GeneratorContext<'_>,
        catalog: &TypeCatalog,
        ty: &ExposedType,
    ) -> Result<()> {
        let strategy =
            select_strategy(ctx, ty)?.ok_or_else(|| MarshalError::no_marshaller(&ty.name))?;
        debug!(type_name = %ty.name, strategy = strategy.name(), "Mapped type");

        let var = match &strategy {
            // The synthesizer has already added and bound the array marshaller.
            MappingStrategy::Array { signature } => ctx
                .plan()
                .binding(&signature.type_id())
                .map(str::to_string)
                .ok_or_else(|| MarshalError::no_marshaller(&ty.name))?,
            _ => {
                let var = format!("m_{}", escape_ident(&ty.name));
                ctx.plan_mut().add_marshaller(var.clone(), strategy);
                ctx.plan_mut().bind(&ty.name, &var)?;
                var
            }
        };

        for alias in catalog.aliases_of(&ty.name) {
            ctx.plan_mut().bind(alias, &var)?;
        }
        Ok(())
    }

    /// Generate the factory source text.
    pub fn generate(&self, package: &str, class_name: &str) -> Result<String> {
        self.build_plan(package, class_name)?.to_source()
    }

    /// Generate and build a live factory in one step.
    pub fn build_factory(&self, package: &str, class_name: &str) -> Result<MarshallerFactory> {
        let plan = self.build_plan(package, class_name)?;
        MarshallerFactory::from_plan(&plan, &self.providers)
    }
}
