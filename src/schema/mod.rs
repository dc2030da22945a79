// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Catalog of exposed types.
//!
//! This module provides:
//! - [`TypeCatalog`] - exposed types plus the alias table, loaded from JSON
//!   or TOML
//! - [`Fingerprint`] - content hash of a catalog, used as the cache key

pub mod catalog;
pub mod fingerprint;

pub use catalog::{ExposedType, TypeCatalog, TypeShape};
pub use fingerprint::Fingerprint;

/// Catalog file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// JSON document
    Json,
    /// TOML document
    Toml,
}

impl CatalogFormat {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(CatalogFormat::Json),
            "toml" => Some(CatalogFormat::Toml),
            _ => None,
        }
    }

    /// Guess the format from a file path's extension.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogFormat::Json => "json",
            CatalogFormat::Toml => "toml",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_catalog_format_parse() {
        assert_eq!(CatalogFormat::parse("JSON"), Some(CatalogFormat::Json));
        assert_eq!(CatalogFormat::parse("toml"), Some(CatalogFormat::Toml));
        assert_eq!(CatalogFormat::parse("yaml"), None);
    }

    #[test]
    fn test_catalog_format_from_path() {
        assert_eq!(
            CatalogFormat::from_path(Path::new("types/catalog.toml")),
            Some(CatalogFormat::Toml)
        );
        assert_eq!(CatalogFormat::from_path(Path::new("catalog")), None);
        assert_eq!(CatalogFormat::Json.as_str(), "json");
    }
}
