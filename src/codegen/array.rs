// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Array marshaller synthesis.

use crate::core::{ArraySignature, Result};

use super::{GeneratorContext, MappingStrategy};

/// Synthesizes one marshaller per distinct array signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArraySynthesizer;

impl ArraySynthesizer {
    /// Make sure the plan holds a marshaller for `signature` and return its
    /// variable name.
    ///
    /// Requesting a signature twice in the same pass returns the existing
    /// variable. A signature already bound by an explicit marshaller keeps
    /// that binding.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::UnknownNestedMarshaller`](crate::core::MarshalError::UnknownNestedMarshaller)
    /// if the component type has no marshaller.
    pub fn add_array_marshaller(
        ctx: &mut GeneratorContext<'_>,
        signature: &ArraySignature,
        owner: &str,
    ) -> Result<String> {
        let type_id = signature.type_id();
        if let Some(var) = ctx.plan().binding(&type_id) {
            return Ok(var.to_string());
        }

        let var = signature.var_name();
        if ctx.plan().has_marshaller(&var) {
            return Ok(var);
        }

        ctx.ensure_resolvable(signature.component(), owner)?;

        ctx.plan_mut().add_marshaller(
            var.clone(),
            MappingStrategy::Array {
                signature: signature.clone(),
            },
        );
        ctx.plan_mut().bind(&type_id, &var)?;
        tracing::debug!(
            signature = %type_id,
            var = %var,
            owner = %owner,
            "Synthesized array marshaller"
        );
        Ok(var)
    }
}
