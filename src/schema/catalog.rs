// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Exposed type catalog.
//!
//! A catalog lists every type the factory must handle, each with a shape
//! (object fields, enum constants, array, or opaque) and optionally an
//! explicit marshaller class, plus an alias table mapping alternative wire
//! identifiers to canonical type names.
//!
//! ```toml
//! [[types]]
//! name = "Person"
//! kind = "object"
//! fields = [
//!     { name = "name", type = "string" },
//!     { name = "age", type = "i32" },
//! ]
//!
//! [[types]]
//! name = "Color"
//! kind = "enum"
//! variants = ["RED", "GREEN"]
//!
//! [aliases]
//! Employee = "Person"
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{MarshalError, PrimitiveType, Result, TypeRef};
use crate::marshal::{
    CollectionTarget, FieldMapping, ListTarget, MapMarshaller, ScalarMarshaller, SetTarget,
    StringMarshaller,
};
use crate::wire::ENCODED_TYPE_KEY;

use super::{CatalogFormat, Fingerprint};

/// Name used in errors about the catalog as a whole.
const CATALOG: &str = "<catalog>";

/// Shape of an exposed type, which decides its derived mapping strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    /// Record mapped field by field
    Object {
        /// Field mappings, in declaration order
        #[serde(default)]
        fields: Vec<FieldMapping>,
    },
    /// Enumeration encoded by constant name
    Enum {
        /// Constants, in declaration order
        variants: Vec<String>,
    },
    /// Array type named by its signature (for example `i32[][]`)
    Array,
    /// No derivable structure; needs an explicit marshaller
    Opaque,
}

/// One exposed type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposedType {
    /// Canonical type name
    pub name: String,
    /// Type shape
    #[serde(flatten)]
    pub shape: TypeShape,
    /// Explicit marshaller class, overriding any derived strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marshaller: Option<String>,
}

impl ExposedType {
    /// Object type with the given fields.
    pub fn object(name: impl Into<String>, fields: Vec<FieldMapping>) -> Self {
        Self::new(name, TypeShape::Object { fields })
    }

    /// Enum type with the given constants.
    pub fn enumeration<S: Into<String>>(
        name: impl Into<String>,
        variants: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            name,
            TypeShape::Enum {
                variants: variants.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Array type exposed under its signature.
    pub fn array(signature: impl Into<String>) -> Self {
        Self::new(signature, TypeShape::Array)
    }

    /// Type with no derivable structure.
    pub fn opaque(name: impl Into<String>) -> Self {
        Self::new(name, TypeShape::Opaque)
    }

    fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
            marshaller: None,
        }
    }

    /// Declare an explicit marshaller class.
    pub fn with_marshaller(mut self, class: impl Into<String>) -> Self {
        self.marshaller = Some(class.into());
        self
    }

    /// Parsed type reference for this type's name.
    pub fn type_ref(&self) -> Result<TypeRef> {
        self.name.parse()
    }

    fn validate(&self) -> Result<()> {
        let parsed = self.type_ref().map_err(|e| {
            MarshalError::invalid_catalog(&self.name, format!("invalid type name: {e}"))
        })?;
        if parsed.type_id() != self.name {
            return Err(MarshalError::invalid_catalog(
                &self.name,
                format!("type name must be written as '{parsed}'"),
            ));
        }

        match (&self.shape, &parsed) {
            (TypeShape::Object { .. } | TypeShape::Enum { .. }, TypeRef::Named(_)) => {}
            (TypeShape::Object { .. } | TypeShape::Enum { .. }, _) => {
                return Err(MarshalError::invalid_catalog(
                    &self.name,
                    "object and enum types need a plain type name",
                ));
            }
            (TypeShape::Array, TypeRef::Array(_)) => {}
            (TypeShape::Array, _) => {
                return Err(MarshalError::invalid_catalog(
                    &self.name,
                    "array types must be named by their signature",
                ));
            }
            (TypeShape::Opaque, TypeRef::Array(_)) => {
                return Err(MarshalError::invalid_catalog(
                    &self.name,
                    "array signatures must use kind \"array\"",
                ));
            }
            (TypeShape::Opaque, _) => {}
        }

        if let Some(class) = &self.marshaller {
            if class.trim().is_empty() {
                return Err(MarshalError::invalid_catalog(
                    &self.name,
                    "empty marshaller class",
                ));
            }
        }

        match &self.shape {
            TypeShape::Object { fields } => {
                let mut seen = HashSet::new();
                for field in fields {
                    if field.name.is_empty() {
                        return Err(MarshalError::invalid_catalog(&self.name, "empty field name"));
                    }
                    if field.name.starts_with('^') {
                        return Err(MarshalError::invalid_catalog(
                            &self.name,
                            format!(
                                "field '{}' collides with reserved keys such as {ENCODED_TYPE_KEY}",
                                field.name
                            ),
                        ));
                    }
                    if !seen.insert(field.name.as_str()) {
                        return Err(MarshalError::invalid_catalog(
                            &self.name,
                            format!("duplicate field '{}'", field.name),
                        ));
                    }
                }
            }
            TypeShape::Enum { variants } => {
                let mut seen = HashSet::new();
                for variant in variants {
                    if variant.is_empty() || !seen.insert(variant.as_str()) {
                        return Err(MarshalError::invalid_catalog(
                            &self.name,
                            format!("empty or duplicate constant '{variant}'"),
                        ));
                    }
                }
            }
            TypeShape::Array | TypeShape::Opaque => {}
        }
        Ok(())
    }
}

/// Exposed types and alias table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCatalog {
    /// Exposed types
    #[serde(default)]
    pub types: Vec<ExposedType>,
    /// Alias name to canonical type name
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl TypeCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the built-in types: primitives (with boxed aliases),
    /// strings and the dynamic collections.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        for p in PrimitiveType::ALL {
            catalog.add_type(
                ExposedType::opaque(p.name()).with_marshaller(ScalarMarshaller::class_name(p)),
            );
            catalog.add_alias(p.boxed_name(), p.name());
        }
        catalog.add_type(
            ExposedType::opaque(TypeRef::String.type_id())
                .with_marshaller(StringMarshaller::CLASS_NAME),
        );

        let collections: [(TypeRef, &str, &[&str]); 3] = [
            (
                TypeRef::List,
                ListTarget::CLASS_NAME,
                &["array_list", "linked_list", "vector", "stack"],
            ),
            (
                TypeRef::Set,
                SetTarget::CLASS_NAME,
                &["hash_set", "linked_hash_set", "tree_set"],
            ),
            (
                TypeRef::Map,
                MapMarshaller::CLASS_NAME,
                &["hash_map", "linked_hash_map", "tree_map"],
            ),
        ];
        for (ty, class, aliases) in collections {
            let name = ty.type_id();
            for alias in aliases {
                catalog.add_alias(*alias, &name);
            }
            catalog.add_type(ExposedType::opaque(name).with_marshaller(class));
        }
        catalog
    }

    /// Add an exposed type.
    pub fn add_type(&mut self, ty: ExposedType) -> &mut Self {
        self.types.push(ty);
        self
    }

    /// Builder-style [`add_type`](Self::add_type).
    pub fn with_type(mut self, ty: ExposedType) -> Self {
        self.add_type(ty);
        self
    }

    /// Add an alias for a canonical type name.
    pub fn add_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) -> &mut Self {
        self.aliases.insert(alias.into(), target.into());
        self
    }

    /// Builder-style [`add_alias`](Self::add_alias).
    pub fn with_alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.add_alias(alias, target);
        self
    }

    /// Append another catalog's types and aliases.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::InvalidAlias`] if both catalogs declare the
    /// same alias.
    pub fn merge(&mut self, other: TypeCatalog) -> Result<()> {
        for (alias, target) in other.aliases {
            if let Some(existing) = self.aliases.get(&alias) {
                return Err(MarshalError::invalid_alias(
                    alias,
                    target,
                    format!("already an alias of '{existing}'"),
                ));
            }
            self.aliases.insert(alias, target);
        }
        self.types.extend(other.types);
        Ok(())
    }

    /// Get an exposed type by canonical name.
    pub fn get(&self, name: &str) -> Option<&ExposedType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Get an exposed type by canonical name or alias.
    pub fn resolve(&self, name: &str) -> Option<&ExposedType> {
        let canonical = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.get(canonical)
    }

    /// Whether `name` is a canonical type name or an alias.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Aliases pointing at `canonical`, sorted.
    pub fn aliases_of(&self, canonical: &str) -> Vec<&str> {
        self.aliases
            .iter()
            .filter(|(_, target)| target.as_str() == canonical)
            .map(|(alias, _)| alias.as_str())
            .collect()
    }

    /// Number of exposed types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog has no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Check names, shapes and the alias table.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::InvalidCatalog`] for malformed or duplicate
    /// types and [`MarshalError::InvalidAlias`] for an alias that shadows a
    /// canonical name or does not point at one.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for ty in &self.types {
            ty.validate()?;
            if !names.insert(ty.name.as_str()) {
                return Err(MarshalError::invalid_catalog(
                    &ty.name,
                    "type declared more than once",
                ));
            }
        }

        for (alias, target) in &self.aliases {
            if names.contains(alias.as_str()) {
                return Err(MarshalError::invalid_alias(
                    alias,
                    target,
                    "alias shadows a canonical type",
                ));
            }
            match alias.parse::<TypeRef>() {
                Ok(TypeRef::Array(_)) | Err(_) => {
                    return Err(MarshalError::invalid_alias(
                        alias,
                        target,
                        "alias is not a valid type name",
                    ));
                }
                Ok(parsed) if parsed.type_id() != *alias => {
                    return Err(MarshalError::invalid_alias(
                        alias,
                        target,
                        format!("alias must be written as '{parsed}'"),
                    ));
                }
                Ok(_) => {}
            }
            if !names.contains(target.as_str()) {
                return Err(MarshalError::invalid_alias(
                    alias,
                    target,
                    "target is not a canonical type",
                ));
            }
        }
        Ok(())
    }

    /// Parse a catalog document.
    pub fn parse(text: &str, format: CatalogFormat) -> Result<Self> {
        match format {
            CatalogFormat::Json => Self::from_json_str(text),
            CatalogFormat::Toml => Self::from_toml_str(text),
        }
    }

    /// Parse a JSON catalog document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| MarshalError::invalid_catalog(CATALOG, e.to_string()))
    }

    /// Parse a TOML catalog document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| MarshalError::invalid_catalog(CATALOG, e.to_string()))
    }

    /// Load a catalog file merged over the built-in types, and validate it.
    ///
    /// The format follows the file extension; anything other than `.toml`
    /// is read as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            MarshalError::invalid_catalog(CATALOG, format!("{}: {e}", path.display()))
        })?;
        let format = CatalogFormat::from_path(path).unwrap_or(CatalogFormat::Json);

        let mut catalog = Self::with_builtins();
        catalog.merge(Self::parse(&text, format)?)?;
        catalog.validate()?;
        tracing::debug!(
            path = %path.display(),
            types = catalog.len(),
            aliases = catalog.aliases.len(),
            "Loaded type catalog"
        );
        Ok(catalog)
    }

    /// Copy with types sorted by name, independent of declaration order.
    pub fn canonicalized(&self) -> Self {
        let mut copy = self.clone();
        copy.types.sort_by(|a, b| a.name.cmp(&b.name));
        copy
    }

    /// Fingerprint of this catalog for a given output package and class,
    /// generated with the marshaller classes named by `providers`.
    pub fn fingerprint<S: AsRef<str>>(
        &self,
        providers: &[S],
        package: &str,
        class_name: &str,
    ) -> Result<Fingerprint> {
        Fingerprint::compute(self, providers, package, class_name)
    }
}
