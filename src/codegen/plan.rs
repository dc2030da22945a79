// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Factory plan: the generated artifact.
//!
//! A plan lists every marshaller to instantiate (keyed by a variable name)
//! and binds each wire identifier to one of them. Its pretty-printed JSON
//! form is the factory source that the cache stores and that
//! [`MarshallerFactory::load`](crate::registry::MarshallerFactory::load)
//! turns back into a live registry.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::{MarshalError, Result};

use super::MappingStrategy;

/// One marshaller instance in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMarshaller {
    /// Variable name, unique within the plan
    pub var: String,
    /// How the marshaller is built
    #[serde(flatten)]
    pub strategy: MappingStrategy,
}

/// Generated marshaller factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryPlan {
    /// Output package
    pub package: String,
    /// Output class name
    pub class_name: String,
    /// Generator version that produced the plan
    pub generator: String,
    /// Marshaller instances, in creation order
    pub marshallers: Vec<PlannedMarshaller>,
    /// Wire identifier to marshaller variable
    pub bindings: BTreeMap<String, String>,
}

impl FactoryPlan {
    /// Qualified factory name, `package.ClassName`.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.class_name.clone()
        } else {
            format!("{}.{}", self.package, self.class_name)
        }
    }

    /// Get a planned marshaller by variable name.
    pub fn marshaller(&self, var: &str) -> Option<&PlannedMarshaller> {
        self.marshallers.iter().find(|m| m.var == var)
    }

    /// Variable bound to a wire identifier.
    pub fn binding(&self, type_id: &str) -> Option<&str> {
        self.bindings.get(type_id).map(String::as_str)
    }

    /// Check that variables are unique and every binding names one.
    pub fn validate(&self) -> Result<()> {
        let mut vars = HashSet::new();
        for m in &self.marshallers {
            if !vars.insert(m.var.as_str()) {
                return Err(MarshalError::parse(
                    "factory source",
                    format!("marshaller '{}' declared twice", m.var),
                ));
            }
        }
        for (type_id, var) in &self.bindings {
            if !vars.contains(var.as_str()) {
                return Err(MarshalError::parse(
                    "factory source",
                    format!("'{type_id}' bound to undeclared marshaller '{var}'"),
                ));
            }
        }
        Ok(())
    }

    /// Render the factory source.
    pub fn to_source(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }

    /// Parse a factory source.
    pub fn from_source(text: &str) -> Result<Self> {
        let plan: FactoryPlan = serde_json::from_str(text)
            .map_err(|e| MarshalError::parse("factory source", e.to_string()))?;
        plan.validate()?;
        Ok(plan)
    }
}

/// Incremental plan construction with binding checks.
#[derive(Debug, Default)]
pub struct PlanBuilder {
    marshallers: Vec<PlannedMarshaller>,
    vars: HashSet<String>,
    bindings: BTreeMap<String, String>,
}

impl PlanBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marshaller. Returns `false` if `var` already exists.
    pub fn add_marshaller(&mut self, var: impl Into<String>, strategy: MappingStrategy) -> bool {
        let var = var.into();
        if !self.vars.insert(var.clone()) {
            return false;
        }
        self.marshallers.push(PlannedMarshaller { var, strategy });
        true
    }

    /// Whether a marshaller variable exists.
    pub fn has_marshaller(&self, var: &str) -> bool {
        self.vars.contains(var)
    }

    /// Bind a wire identifier to an existing marshaller variable.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::DuplicateBinding`] if `type_id` is already bound.
    pub fn bind(&mut self, type_id: impl Into<String>, var: impl Into<String>) -> Result<()> {
        let type_id = type_id.into();
        if self.bindings.contains_key(&type_id) {
            return Err(MarshalError::duplicate_binding(type_id));
        }
        self.bindings.insert(type_id, var.into());
        Ok(())
    }

    /// Variable bound to `type_id`, if any.
    pub fn binding(&self, type_id: &str) -> Option<&str> {
        self.bindings.get(type_id).map(String::as_str)
    }

    /// Number of marshallers added so far.
    pub fn marshaller_count(&self) -> usize {
        self.marshallers.len()
    }

    /// Finish into a plan for `package`.`class_name`.
    pub fn finish(self, package: &str, class_name: &str) -> FactoryPlan {
        FactoryPlan {
            package: package.to_string(),
            class_name: class_name.to_string(),
            generator: env!("CARGO_PKG_VERSION").to_string(),
            marshallers: self.marshallers,
            bindings: self.bindings,
        }
    }
}
