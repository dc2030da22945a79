// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Mapping strategy selection.
//!
//! For each exposed type the first applicable strategy wins:
//!
//! 1. an explicitly declared marshaller class
//! 2. array synthesis, for types named by an array signature
//! 3. enum-by-name
//! 4. reflective field mapping, for object types
//!
//! A type matching none of these has no marshaller, which the generator
//! reports as a generation error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{ArraySignature, MarshalError, Result};
use crate::marshal::{
    ArrayMarshaller, EnumMarshaller, FieldMapping, Marshaller, MarshallerProviders,
    ObjectMarshaller,
};
use crate::schema::{ExposedType, TypeShape};

use super::{ArraySynthesizer, GeneratorContext};

/// How one marshaller is obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum MappingStrategy {
    /// Instantiate a registered marshaller class
    Explicit {
        /// Marshaller class name
        class: String,
        /// Type declaring the class
        type_name: String,
    },
    /// Synthesized dimension-recursive array marshaller
    Array {
        /// Array shape
        signature: ArraySignature,
    },
    /// Enum encoded by constant name
    Enum {
        /// Canonical enum name
        type_name: String,
        /// Declared constants
        variants: Vec<String>,
    },
    /// Field-by-field object mapping
    Reflective {
        /// Canonical type name
        type_name: String,
        /// Field mappings
        fields: Vec<FieldMapping>,
    },
}

impl MappingStrategy {
    /// Short strategy name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            MappingStrategy::Explicit { .. } => "explicit",
            MappingStrategy::Array { .. } => "array",
            MappingStrategy::Enum { .. } => "enum",
            MappingStrategy::Reflective { .. } => "reflective",
        }
    }

    /// Build the marshaller this strategy describes.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::UnknownMarshallerClass`] if an explicit class
    /// has no provider.
    pub fn instantiate(&self, providers: &MarshallerProviders) -> Result<Arc<dyn Marshaller>> {
        Ok(match self {
            MappingStrategy::Explicit { class, type_name } => providers.create(class, type_name)?,
            MappingStrategy::Array { signature } => {
                Arc::new(ArrayMarshaller::new(signature.clone()))
            }
            MappingStrategy::Enum {
                type_name,
                variants,
            } => Arc::new(EnumMarshaller::new(type_name.clone(), variants.clone())),
            MappingStrategy::Reflective { type_name, fields } => {
                Arc::new(ObjectMarshaller::new(type_name.clone(), fields.clone()))
            }
        })
    }
}

/// Pick the mapping strategy for `ty`, or `None` if no strategy applies.
///
/// Array types are synthesized into the plan as a side effect, as are any
/// array-typed fields of an object. Every type a field refers to must
/// already be known to the context.
///
/// # Errors
///
/// Returns [`MarshalError::UnknownMarshallerClass`] for an explicit class
/// with no provider and [`MarshalError::UnknownNestedMarshaller`] for a
/// field or component type with no derivable marshaller.
pub fn select_strategy(
    ctx: &mut GeneratorContext<'_>,
    ty: &ExposedType,
) -> Result<Option<MappingStrategy>> {
    if let Some(class) = &ty.marshaller {
        if !ctx.providers().contains(class) {
            return Err(MarshalError::unknown_class(class, &ty.name));
        }
        return Ok(Some(MappingStrategy::Explicit {
            class: class.clone(),
            type_name: ty.name.clone(),
        }));
    }

    match &ty.shape {
        TypeShape::Array => {
            let parsed = ty.type_ref()?;
            let signature = parsed
                .as_array()
                .cloned()
                .ok_or_else(|| MarshalError::no_marshaller(&ty.name))?;
            ArraySynthesizer::add_array_marshaller(ctx, &signature, &ty.name)?;
            Ok(Some(MappingStrategy::Array { signature }))
        }
        TypeShape::Enum { variants } => Ok(Some(MappingStrategy::Enum {
            type_name: ty.name.clone(),
            variants: variants.clone(),
        })),
        TypeShape::Object { fields } => {
            for field in fields {
                let owner = format!("{}.{}", ty.name, field.name);
                ctx.ensure_resolvable(&field.declared, &owner)?;
            }
            Ok(Some(MappingStrategy::Reflective {
                type_name: ty.name.clone(),
                fields: fields.clone(),
            }))
        }
        TypeShape::Opaque => Ok(None),
    }
}
