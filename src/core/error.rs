// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for marshalgen.
//!
//! Generation-time errors (unresolvable types, unknown nested marshallers,
//! duplicate bindings) abort a whole generation pass. Runtime errors
//! (mismatched wire values, unknown enum variants) are returned from the
//! marshall/demarshall call that hit them and are never recovered internally.

use thiserror::Error;

/// Errors raised while generating a marshaller factory or while marshalling.
#[derive(Debug, Clone, Error)]
pub enum MarshalError {
    /// No mapping strategy applies and no explicit marshaller was declared.
    #[error("no available marshaller for class: {type_name}")]
    NoMarshaller {
        /// Offending type
        type_name: String,
    },

    /// A field or element refers to a type with no derivable marshaller.
    #[error("no marshaller for '{referenced}' referenced from '{owner}'")]
    UnknownNestedMarshaller {
        /// Type (or array signature) holding the reference
        owner: String,
        /// Type that could not be resolved
        referenced: String,
    },

    /// An explicit marshaller class name has no registered provider.
    #[error("could not instantiate marshaller class '{class}' for '{type_name}'")]
    UnknownMarshallerClass {
        /// Marshaller class name
        class: String,
        /// Type declaring it
        type_name: String,
    },

    /// A wire identifier was bound twice.
    #[error("duplicate marshaller binding for '{identifier}'")]
    DuplicateBinding {
        /// Wire identifier
        identifier: String,
    },

    /// Alias table violates its invariants.
    #[error("invalid alias '{alias}' -> '{target}': {reason}")]
    InvalidAlias {
        /// Alias name
        alias: String,
        /// Canonical name it points to
        target: String,
        /// What is wrong with it
        reason: String,
    },

    /// Catalog content is malformed.
    #[error("invalid catalog entry '{type_name}': {reason}")]
    InvalidCatalog {
        /// Type name (or `<catalog>` for document-level failures)
        type_name: String,
        /// Validation error message
        reason: String,
    },

    /// Wire value or in-memory value has the wrong shape for its marshaller.
    #[error("type mismatch for '{type_name}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Type being marshalled
        type_name: String,
        /// Expected shape
        expected: String,
        /// Actual shape
        found: String,
    },

    /// Enum constant not declared by the enum type.
    #[error("unknown variant '{variant}' for enum '{type_name}'")]
    UnknownEnumVariant {
        /// Enum type
        type_name: String,
        /// Variant name that was not found
        variant: String,
    },

    /// Wire text could not be parsed.
    #[error("parse error in {context}: {message}")]
    Parse {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Cache storage failure.
    #[error("cache error at {path}: {message}")]
    Cache {
        /// File involved
        path: String,
        /// Error message
        message: String,
    },

    /// Configuration failure.
    #[error("config error: {0}")]
    Config(String),
}

impl MarshalError {
    /// Create a "no available marshaller" error.
    pub fn no_marshaller(type_name: impl Into<String>) -> Self {
        MarshalError::NoMarshaller {
            type_name: type_name.into(),
        }
    }

    /// Create an unknown nested marshaller error.
    pub fn unknown_nested(owner: impl Into<String>, referenced: impl Into<String>) -> Self {
        MarshalError::UnknownNestedMarshaller {
            owner: owner.into(),
            referenced: referenced.into(),
        }
    }

    /// Create an unknown marshaller class error.
    pub fn unknown_class(class: impl Into<String>, type_name: impl Into<String>) -> Self {
        MarshalError::UnknownMarshallerClass {
            class: class.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a duplicate binding error.
    pub fn duplicate_binding(identifier: impl Into<String>) -> Self {
        MarshalError::DuplicateBinding {
            identifier: identifier.into(),
        }
    }

    /// Create an invalid alias error.
    pub fn invalid_alias(
        alias: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MarshalError::InvalidAlias {
            alias: alias.into(),
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid catalog error.
    pub fn invalid_catalog(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        MarshalError::InvalidCatalog {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn mismatch(
        type_name: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        MarshalError::TypeMismatch {
            type_name: type_name.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unknown enum variant error.
    pub fn unknown_variant(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        MarshalError::UnknownEnumVariant {
            type_name: type_name.into(),
            variant: variant.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        MarshalError::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a cache error.
    pub fn cache(path: impl Into<String>, message: impl Into<String>) -> Self {
        MarshalError::Cache {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error belongs to the generation-time taxonomy.
    pub fn is_generation_error(&self) -> bool {
        matches!(
            self,
            MarshalError::NoMarshaller { .. }
                | MarshalError::UnknownNestedMarshaller { .. }
                | MarshalError::UnknownMarshallerClass { .. }
                | MarshalError::DuplicateBinding { .. }
                | MarshalError::InvalidAlias { .. }
                | MarshalError::InvalidCatalog { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            MarshalError::NoMarshaller { type_name } => vec![("type", type_name.clone())],
            MarshalError::UnknownNestedMarshaller { owner, referenced } => {
                vec![("owner", owner.clone()), ("referenced", referenced.clone())]
            }
            MarshalError::UnknownMarshallerClass { class, type_name } => {
                vec![("class", class.clone()), ("type", type_name.clone())]
            }
            MarshalError::DuplicateBinding { identifier } => {
                vec![("identifier", identifier.clone())]
            }
            MarshalError::InvalidAlias {
                alias,
                target,
                reason,
            } => vec![
                ("alias", alias.clone()),
                ("target", target.clone()),
                ("reason", reason.clone()),
            ],
            MarshalError::InvalidCatalog { type_name, reason } => {
                vec![("type", type_name.clone()), ("reason", reason.clone())]
            }
            MarshalError::TypeMismatch {
                type_name,
                expected,
                found,
            } => vec![
                ("type", type_name.clone()),
                ("expected", expected.clone()),
                ("found", found.clone()),
            ],
            MarshalError::UnknownEnumVariant { type_name, variant } => {
                vec![("type", type_name.clone()), ("variant", variant.clone())]
            }
            MarshalError::Parse { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            MarshalError::Cache { path, message } => {
                vec![("path", path.clone()), ("message", message.clone())]
            }
            MarshalError::Config(msg) => vec![("message", msg.clone())],
        }
    }
}

impl From<std::io::Error> for MarshalError {
    fn from(err: std::io::Error) -> Self {
        MarshalError::Cache {
            path: "<io>".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for MarshalError {
    fn from(err: serde_json::Error) -> Self {
        MarshalError::parse("json", err.to_string())
    }
}

/// Result type for marshalgen operations.
pub type Result<T> = std::result::Result<T, MarshalError>;
