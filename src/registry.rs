// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Runtime marshaller registry built from a generated factory.
//!
//! The registry is immutable once built and can be shared across threads.
//! An alias and its canonical name are bound to the same marshaller
//! instance.

use std::collections::HashMap;
use std::sync::Arc;

use crate::codegen::FactoryPlan;
use crate::core::{MarshalError, Result, TypeRef, Value};
use crate::marshal::{Marshaller, MarshallerLookup, MarshallerProviders, MarshallingSession};
use crate::wire::WireValue;

/// Wire identifier to marshaller map produced by a generated factory.
#[derive(Debug)]
pub struct MarshallerFactory {
    package: String,
    class_name: String,
    bindings: HashMap<String, Arc<dyn Marshaller>>,
}

impl MarshallerFactory {
    /// Instantiate every marshaller in `plan` and bind its identifiers.
    ///
    /// # Errors
    ///
    /// Fails if the plan is inconsistent or names a marshaller class with no
    /// provider.
    pub fn from_plan(plan: &FactoryPlan, providers: &MarshallerProviders) -> Result<Self> {
        plan.validate()?;

        let mut instances: HashMap<&str, Arc<dyn Marshaller>> =
            HashMap::with_capacity(plan.marshallers.len());
        for planned in &plan.marshallers {
            instances.insert(&planned.var, planned.strategy.instantiate(providers)?);
        }

        let mut bindings = HashMap::with_capacity(plan.bindings.len());
        for (type_id, var) in &plan.bindings {
            let marshaller = instances.get(var.as_str()).ok_or_else(|| {
                MarshalError::parse(
                    "factory source",
                    format!("'{type_id}' bound to undeclared marshaller '{var}'"),
                )
            })?;
            bindings.insert(type_id.clone(), Arc::clone(marshaller));
        }

        tracing::debug!(
            factory = %plan.qualified_name(),
            marshallers = instances.len(),
            bindings = bindings.len(),
            "Built marshaller registry"
        );
        Ok(Self {
            package: plan.package.clone(),
            class_name: plan.class_name.clone(),
            bindings,
        })
    }

    /// Build a registry from factory source text.
    pub fn load(source: &str, providers: &MarshallerProviders) -> Result<Self> {
        Self::from_plan(&FactoryPlan::from_source(source)?, providers)
    }

    /// Output package of the generating run.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Output class name of the generating run.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Get the marshaller bound to a wire identifier.
    ///
    /// Returns `None` for identifiers the factory does not know.
    pub fn get_marshaller(&self, type_id: &str) -> Option<&Arc<dyn Marshaller>> {
        self.bindings.get(type_id)
    }

    /// All bound identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of bound identifiers.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Session dispatching through this registry.
    pub fn session(&self) -> MarshallingSession<'_> {
        MarshallingSession::new(self)
    }

    /// Encode a value, tagging it with its runtime type.
    pub fn marshall(&self, value: &Value) -> Result<String> {
        self.session().marshall_tagged(value)
    }

    /// Decode tagged wire text.
    pub fn demarshall(&self, text: &str) -> Result<Value> {
        self.session().demarshall_tagged(&WireValue::parse(text)?)
    }

    /// Encode a value against a declared type.
    pub fn marshall_as(&self, declared: &TypeRef, value: &Value) -> Result<String> {
        self.session()
            .marshall_as(declared, value, &declared.type_id())
    }

    /// Decode wire text against a declared type.
    pub fn demarshall_as(&self, declared: &TypeRef, text: &str) -> Result<Value> {
        self.session()
            .demarshall_as(declared, &WireValue::parse(text)?, &declared.type_id())
    }
}

impl MarshallerLookup for MarshallerFactory {
    fn lookup(&self, type_id: &str) -> Option<&Arc<dyn Marshaller>> {
        self.get_marshaller(type_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::FactoryGenerator;
    use crate::core::{ObjectValue, PrimitiveType};
    use crate::marshal::FieldMapping;
    use crate::schema::{ExposedType, TypeCatalog};

    fn factory() -> MarshallerFactory {
        let catalog = TypeCatalog::with_builtins()
            .with_type(ExposedType::object(
                "Point",
                vec![
                    FieldMapping::new("x", TypeRef::Primitive(PrimitiveType::F64)),
                    FieldMapping::new("y", TypeRef::Primitive(PrimitiveType::F64)),
                ],
            ))
            .with_alias("Vec2", "Point");
        FactoryGenerator::new(catalog)
            .build_factory("geo", "GeoFactory")
            .unwrap()
    }

    #[test]
    fn test_alias_shares_instance() {
        let factory = factory();
        let point = factory.get_marshaller("Point").unwrap();
        let vec2 = factory.get_marshaller("Vec2").unwrap();
        assert!(Arc::ptr_eq(point, vec2));
        assert!(Arc::ptr_eq(
            factory.get_marshaller("i32").unwrap(),
            factory.get_marshaller("i32?").unwrap()
        ));
    }

    #[test]
    fn test_unknown_identifier() {
        assert!(factory().get_marshaller("Nope").is_none());
    }

    #[test]
    fn test_round_trip() {
        let factory = factory();
        let value = Value::Object(ObjectValue::new("Point").with("x", 1.5).with("y", -2.0));
        let text = factory.marshall(&value).unwrap();
        assert_eq!(text, r#"{"^EncodedType":"Point","x":1.5,"y":-2.0}"#);
        assert_eq!(factory.demarshall(&text).unwrap(), value);
    }

    #[test]
    fn test_declared_type_dispatch() {
        let factory = factory();
        let int = TypeRef::Primitive(PrimitiveType::I32);
        assert_eq!(factory.marshall_as(&int, &Value::I32(3)).unwrap(), "3");
        assert_eq!(factory.demarshall_as(&int, "3").unwrap(), Value::I32(3));
        assert!(factory.demarshall_as(&int, "null").is_err());
    }

    #[test]
    fn test_load_from_source() {
        let catalog = TypeCatalog::with_builtins();
        let source = FactoryGenerator::new(catalog).generate("app", "Factory").unwrap();
        let factory = MarshallerFactory::load(&source, &MarshallerProviders::builtin()).unwrap();
        assert_eq!(factory.class_name(), "Factory");
        assert!(factory.identifiers().contains(&"any[]"));
    }

    #[test]
    fn test_load_requires_providers() {
        let source = FactoryGenerator::new(TypeCatalog::with_builtins())
            .generate("app", "Factory")
            .unwrap();
        let err = MarshallerFactory::load(&source, &MarshallerProviders::new()).unwrap_err();
        assert!(matches!(err, MarshalError::UnknownMarshallerClass { .. }));
    }
}
