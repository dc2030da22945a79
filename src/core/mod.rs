// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout marshalgen.
//!
//! This module provides the foundational types for the library:
//! - [`MarshalError`] - Generation-time and runtime error taxonomy
//! - [`Value`] - In-memory object graph
//! - [`TypeRef`] / [`ArraySignature`] - Type references and array shapes
//! - [`Encoding`] - Wire format identifier

pub mod error;
pub mod types;
pub mod value;

pub use error::{MarshalError, Result};
pub use types::{ArraySignature, PrimitiveType, TypeRef};
pub use value::{ArrayValue, EnumValue, ObjectFields, ObjectValue, Value};

/// Wire format identifier reported by every marshaller.
///
/// Only JSON exists today; the tag is carried so that a second format can be
/// dispatched on without changing the marshaller contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// JSON text
    #[default]
    Json,
}

/// Error returned when parsing an `Encoding` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseEncodingError {
    _private: (),
}

impl std::fmt::Display for ParseEncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid encoding name, expected 'json'")
    }
}

impl std::error::Error for ParseEncodingError {}

impl std::str::FromStr for Encoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Encoding::Json),
            _ => Err(ParseEncodingError { _private: () }),
        }
    }
}

impl Encoding {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Json => "json",
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
