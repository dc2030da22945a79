// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Marshalgen
//!
//! Build-time generator of JSON marshaller factories.
//!
//! Given a catalog of exposed types (objects, enums, arrays and opaque types
//! with explicit marshaller classes, plus an alias table), the generator
//! selects a mapping strategy per type, synthesizes one marshaller per
//! distinct array signature and emits a factory that binds every wire
//! identifier to a marshaller instance. The emitted factory source is cached
//! under a fingerprint of the catalog, so unchanged catalogs are never
//! regenerated.
//!
//! ## Architecture
//!
//! - `core/` - error taxonomy, type references, in-memory values
//! - `wire/` - parsed wire values and JSON text writers
//! - `marshal/` - the marshaller contract and every marshaller kind
//! - `schema/` - the exposed type catalog and its fingerprint
//! - `codegen/` - strategy selection, array synthesis, factory generation
//! - `registry` - runtime registry built from a generated factory
//! - `cache` - fingerprint-keyed cache of generated sources
//! - `config` - generator settings from TOML and the environment
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use marshalgen::{ExposedType, FactoryGenerator, FieldMapping, ObjectValue, TypeCatalog, TypeRef, Value};
//!
//! let catalog = TypeCatalog::with_builtins().with_type(ExposedType::object(
//!     "Person",
//!     vec![FieldMapping::new("name", TypeRef::String)],
//! ));
//! let factory = FactoryGenerator::new(catalog).build_factory("app", "AppMarshallers")?;
//!
//! let ada = Value::Object(ObjectValue::new("Person").with("name", "Ada"));
//! let text = factory.marshall(&ada)?;
//! assert_eq!(text, r#"{"^EncodedType":"Person","name":"Ada"}"#);
//! assert_eq!(factory.demarshall(&text)?, ada);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{
    ArraySignature, ArrayValue, Encoding, EnumValue, MarshalError, ObjectValue, PrimitiveType,
    Result, TypeRef, Value,
};

// Wire representation
pub mod wire;

pub use wire::WireValue;

// Marshallers
pub mod marshal;

pub use marshal::{FieldMapping, Marshaller, MarshallerProviders, MarshallingSession};

// Exposed type catalog
pub mod schema;

pub use schema::{ExposedType, Fingerprint, TypeCatalog, TypeShape};

// Factory generation
pub mod codegen;

pub use codegen::{FactoryGenerator, FactoryPlan, MappingStrategy};

// Runtime registry
pub mod registry;

pub use registry::MarshallerFactory;

// Generation cache and settings
pub mod cache;
pub mod config;

pub use cache::GenerationCache;
pub use config::GeneratorConfig;
