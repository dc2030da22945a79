// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type references used by catalogs, generated marshallers and the runtime
//! registry.
//!
//! Every type has a textual spelling which doubles as its wire identifier:
//! primitives are `i32`, `f64`, ...; a nullable (boxed) primitive is `i32?`;
//! arrays append one `[]` per dimension (`i32[][]`, `Person[]`, `any[]`).

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::{MarshalError, Result};

/// Wire identifier of the string type.
pub const STRING_TYPE: &str = "string";
/// Wire identifier of the list type.
pub const LIST_TYPE: &str = "list";
/// Wire identifier of the set type.
pub const SET_TYPE: &str = "set";
/// Wire identifier of the map type.
pub const MAP_TYPE: &str = "map";
/// Wire identifier of the dynamically typed element.
pub const ANY_TYPE: &str = "any";

/// Primitive scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    /// Boolean
    Bool,
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
    /// Unicode scalar value
    Char,
}

impl PrimitiveType {
    /// All primitive types, in declaration order.
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Bool,
        PrimitiveType::I8,
        PrimitiveType::I16,
        PrimitiveType::I32,
        PrimitiveType::I64,
        PrimitiveType::F32,
        PrimitiveType::F64,
        PrimitiveType::Char,
    ];

    /// Canonical wire name.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::I8 => "i8",
            PrimitiveType::I16 => "i16",
            PrimitiveType::I32 => "i32",
            PrimitiveType::I64 => "i64",
            PrimitiveType::F32 => "f32",
            PrimitiveType::F64 => "f64",
            PrimitiveType::Char => "char",
        }
    }

    /// Wire name of the nullable form.
    pub fn boxed_name(self) -> String {
        format!("{}?", self.name())
    }

    /// Parse a primitive type from a string, accepting common synonyms.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "bool" | "boolean" => Some(PrimitiveType::Bool),
            "i8" | "byte" | "int8" => Some(PrimitiveType::I8),
            "i16" | "short" | "int16" => Some(PrimitiveType::I16),
            "i32" | "int" | "int32" => Some(PrimitiveType::I32),
            "i64" | "long" | "int64" => Some(PrimitiveType::I64),
            "f32" | "float" | "float32" => Some(PrimitiveType::F32),
            "f64" | "double" | "float64" => Some(PrimitiveType::F64),
            "char" => Some(PrimitiveType::Char),
            _ => None,
        }
    }

    /// Check if this is an integer type.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            PrimitiveType::I8 | PrimitiveType::I16 | PrimitiveType::I32 | PrimitiveType::I64
        )
    }

    /// Check if this is a floating-point type.
    pub fn is_float(self) -> bool {
        matches!(self, PrimitiveType::F32 | PrimitiveType::F64)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference to a marshallable type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// Non-nullable primitive
    Primitive(PrimitiveType),
    /// Nullable primitive
    Boxed(PrimitiveType),
    /// UTF-8 string
    String,
    /// Ordered collection
    List,
    /// Collection without duplicates
    Set,
    /// Key/value collection
    Map,
    /// Dynamically typed value, tagged on the wire
    Any,
    /// Exposed type (object or enum) or alias, by wire identifier
    Named(String),
    /// Array of any dimension
    Array(ArraySignature),
}

impl TypeRef {
    /// Create a named type reference.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// Create an array of `dimensions` dimensions over this type.
    pub fn array_of(self, dimensions: usize) -> Self {
        TypeRef::Array(ArraySignature::new(self, dimensions))
    }

    /// Wire identifier of this type.
    pub fn type_id(&self) -> String {
        match self {
            TypeRef::Primitive(p) => p.name().to_string(),
            TypeRef::Boxed(p) => p.boxed_name(),
            TypeRef::String => STRING_TYPE.to_string(),
            TypeRef::List => LIST_TYPE.to_string(),
            TypeRef::Set => SET_TYPE.to_string(),
            TypeRef::Map => MAP_TYPE.to_string(),
            TypeRef::Any => ANY_TYPE.to_string(),
            TypeRef::Named(name) => name.clone(),
            TypeRef::Array(sig) => sig.type_id(),
        }
    }

    /// Whether `null` is an acceptable value for this type.
    ///
    /// Only unboxed primitives reject null.
    pub fn is_nullable(&self) -> bool {
        !matches!(self, TypeRef::Primitive(_))
    }

    /// Get the array signature, if this is an array type.
    pub fn as_array(&self) -> Option<&ArraySignature> {
        match self {
            TypeRef::Array(sig) => Some(sig),
            _ => None,
        }
    }

    /// Whether values of this type carry their own type tag on the wire.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, TypeRef::Any | TypeRef::Named(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_id())
    }
}

fn named_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
            .unwrap_or_else(|e| unreachable!("static type name pattern: {e}"))
    })
}

/// Check whether `name` is a legal exposed-type name.
pub fn is_valid_type_name(name: &str) -> bool {
    named_type_pattern().is_match(name)
}

fn parse_base(base: &str) -> Result<TypeRef> {
    if let Some(inner) = base.strip_suffix('?') {
        return PrimitiveType::try_from_str(inner)
            .map(TypeRef::Boxed)
            .ok_or_else(|| MarshalError::parse("type", format!("only primitives can be boxed: '{base}'")));
    }

    if let Some(p) = PrimitiveType::try_from_str(base) {
        return Ok(TypeRef::Primitive(p));
    }

    match base {
        "string" | "str" => Ok(TypeRef::String),
        "list" => Ok(TypeRef::List),
        "set" => Ok(TypeRef::Set),
        "map" => Ok(TypeRef::Map),
        "any" | "object" => Ok(TypeRef::Any),
        _ if is_valid_type_name(base) => Ok(TypeRef::Named(base.to_string())),
        _ => Err(MarshalError::parse(
            "type",
            format!("invalid type name '{base}'"),
        )),
    }
}

impl FromStr for TypeRef {
    type Err = MarshalError;

    fn from_str(s: &str) -> Result<Self> {
        let mut base = s.trim();
        let mut dimensions = 0usize;
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped.trim_end();
            dimensions += 1;
        }

        let component = parse_base(base)?;
        if dimensions == 0 {
            Ok(component)
        } else {
            Ok(TypeRef::Array(ArraySignature::new(component, dimensions)))
        }
    }
}

impl TryFrom<String> for TypeRef {
    type Error = MarshalError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.type_id()
    }
}

/// Shape of an array: base component type and dimension count.
///
/// The component is never itself an array; nesting is flattened into
/// `dimensions`, which is always at least one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArraySignature {
    /// Base (innermost) component type
    pub component: Box<TypeRef>,
    /// Number of dimensions
    pub dimensions: usize,
}

impl ArraySignature {
    /// Create a signature, flattening array components.
    pub fn new(component: TypeRef, dimensions: usize) -> Self {
        let dimensions = dimensions.max(1);
        match component {
            TypeRef::Array(inner) => Self {
                component: inner.component,
                dimensions: inner.dimensions + dimensions,
            },
            other => Self {
                component: Box::new(other),
                dimensions,
            },
        }
    }

    /// Base component type.
    pub fn component(&self) -> &TypeRef {
        &self.component
    }

    /// Wire identifier (`i32[][]`).
    pub fn type_id(&self) -> String {
        let mut id = self.component.type_id();
        for _ in 0..self.dimensions {
            id.push_str("[]");
        }
        id
    }

    /// Identifier-safe key naming the synthesized marshaller for this shape.
    ///
    /// Distinct signatures always produce distinct keys.
    pub fn var_name(&self) -> String {
        format!(
            "arr_{}_d{}",
            escape_ident(&self.component.type_id()),
            self.dimensions
        )
    }

    /// Type of one element at the outermost dimension.
    pub fn element_type(&self) -> TypeRef {
        match self.inner() {
            Some(inner) => TypeRef::Array(inner),
            None => (*self.component).clone(),
        }
    }

    /// Signature with one dimension fewer, if any remain.
    pub fn inner(&self) -> Option<ArraySignature> {
        (self.dimensions > 1).then(|| ArraySignature {
            component: self.component.clone(),
            dimensions: self.dimensions - 1,
        })
    }
}

impl fmt::Display for ArraySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_id())
    }
}

/// Escape an identifier so that distinct inputs yield distinct outputs.
///
/// ASCII alphanumerics pass through; every other char becomes `_<hex>_`.
pub fn escape_ident(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            out.push_str(&format!("_{:x}_", c as u32));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_synonyms() {
        assert_eq!(PrimitiveType::try_from_str("int"), Some(PrimitiveType::I32));
        assert_eq!(PrimitiveType::try_from_str("double"), Some(PrimitiveType::F64));
        assert_eq!(PrimitiveType::try_from_str("boolean"), Some(PrimitiveType::Bool));
        assert_eq!(PrimitiveType::try_from_str("Person"), None);
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!("i32".parse::<TypeRef>().unwrap(), TypeRef::Primitive(PrimitiveType::I32));
        assert_eq!("long?".parse::<TypeRef>().unwrap(), TypeRef::Boxed(PrimitiveType::I64));
        assert_eq!("string".parse::<TypeRef>().unwrap(), TypeRef::String);
        assert_eq!("any".parse::<TypeRef>().unwrap(), TypeRef::Any);
        assert_eq!(
            "org.example.Person".parse::<TypeRef>().unwrap(),
            TypeRef::named("org.example.Person")
        );
    }

    #[test]
    fn test_parse_arrays() {
        let ty: TypeRef = "i32[][]".parse().unwrap();
        let sig = ty.as_array().unwrap();
        assert_eq!(sig.dimensions, 2);
        assert_eq!(sig.component(), &TypeRef::Primitive(PrimitiveType::I32));
        assert_eq!(ty.type_id(), "i32[][]");

        let boxed: TypeRef = "f64?[]".parse().unwrap();
        assert_eq!(boxed.type_id(), "f64?[]");
    }

    #[test]
    fn test_parse_rejects_bad_names() {
        assert!("Person?".parse::<TypeRef>().is_err());
        assert!("".parse::<TypeRef>().is_err());
        assert!("has space".parse::<TypeRef>().is_err());
        assert!("[]".parse::<TypeRef>().is_err());
    }

    #[test]
    fn test_array_signature_flattens() {
        let inner = TypeRef::String.array_of(2);
        let outer = ArraySignature::new(inner, 1);
        assert_eq!(outer.dimensions, 3);
        assert_eq!(outer.type_id(), "string[][][]");
    }

    #[test]
    fn test_element_type() {
        let sig = ArraySignature::new(TypeRef::Primitive(PrimitiveType::I32), 2);
        assert_eq!(sig.element_type().type_id(), "i32[]");
        assert_eq!(sig.inner().unwrap().element_type().type_id(), "i32");
    }

    #[test]
    fn test_var_name_distinguishes_shapes() {
        let a = ArraySignature::new(TypeRef::Primitive(PrimitiveType::I32), 1);
        let b = ArraySignature::new(TypeRef::Boxed(PrimitiveType::I32), 1);
        let c = ArraySignature::new(TypeRef::Primitive(PrimitiveType::I32), 2);
        assert_ne!(a.var_name(), b.var_name());
        assert_ne!(a.var_name(), c.var_name());
        assert_eq!(a.var_name(), "arr_i32_d1");
    }

    #[test]
    fn test_escape_ident_is_injective_on_separators() {
        assert_ne!(escape_ident("a.b"), escape_ident("a_b"));
        assert_eq!(escape_ident("abc"), "abc");
    }

    #[test]
    fn test_nullability() {
        assert!(!TypeRef::Primitive(PrimitiveType::I32).is_nullable());
        assert!(TypeRef::Boxed(PrimitiveType::I32).is_nullable());
        assert!(TypeRef::named("Person").is_nullable());
    }

    #[test]
    fn test_serde_uses_text_form() {
        let ty: TypeRef = serde_json::from_str("\"Person[][]\"").unwrap();
        assert_eq!(ty.type_id(), "Person[][]");
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"Person[][]\"");
    }
}
