// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Catalog fingerprint.
//!
//! SHA-256 over the canonical JSON form of the catalog (types sorted by
//! name), the sorted names of the marshaller classes available to explicit
//! mappings, the output package and class name, and the generator version.
//! Two catalogs that differ only in declaration order of their types share
//! a fingerprint; any other change produces a new one.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::core::Result;

use super::TypeCatalog;

#[derive(Serialize)]
struct FingerprintInput<'a> {
    generator: &'static str,
    package: &'a str,
    class_name: &'a str,
    providers: Vec<&'a str>,
    catalog: TypeCatalog,
}

/// Hex-encoded SHA-256 fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint `catalog` as generated into `package`.`class_name` with
    /// the marshaller classes named by `providers` available.
    pub fn compute<S: AsRef<str>>(
        catalog: &TypeCatalog,
        providers: &[S],
        package: &str,
        class_name: &str,
    ) -> Result<Self> {
        let mut providers: Vec<&str> = providers.iter().map(|p| p.as_ref()).collect();
        providers.sort_unstable();
        providers.dedup();
        let input = FingerprintInput {
            generator: env!("CARGO_PKG_VERSION"),
            package,
            class_name,
            providers,
            catalog: catalog.canonicalized(),
        };
        let bytes = serde_json::to_vec(&input)?;
        Ok(Fingerprint(hex::encode(Sha256::digest(&bytes))))
    }

    /// Wrap a previously stored fingerprint, ignoring surrounding whitespace.
    pub fn from_stored(text: &str) -> Self {
        Fingerprint(text.trim().to_string())
    }

    /// Hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
