// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use marshalgen::{
    ArraySignature, FactoryGenerator, MarshallerFactory, ObjectValue, PrimitiveType,
    TypeCatalog, TypeRef, Value,
};

/// Get the path to a test fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The shop catalog, merged over the built-in types.
pub fn shop_catalog() -> TypeCatalog {
    TypeCatalog::load(fixture_path("shop.toml")).expect("shop catalog loads")
}

/// Generator over the shop catalog.
pub fn shop_generator() -> FactoryGenerator {
    FactoryGenerator::new(shop_catalog())
}

/// Live factory for the shop catalog.
pub fn shop_factory() -> MarshallerFactory {
    shop_generator()
        .build_factory("shop.gen", "ShopMarshallers")
        .expect("shop factory builds")
}

pub fn int_array(dimensions: usize, items: Vec<Value>) -> Value {
    Value::array(
        ArraySignature::new(TypeRef::Primitive(PrimitiveType::I32), dimensions),
        items,
    )
}

pub fn ints(values: &[i32]) -> Value {
    int_array(1, values.iter().copied().map(Value::I32).collect())
}

pub fn address(city: &str) -> Value {
    Value::Object(
        ObjectValue::new("Address")
            .with("street", "1 Main St")
            .with("city", city)
            .with("zip", Value::Null),
    )
}

pub fn person(name: &str) -> ObjectValue {
    ObjectValue::new("Person")
        .with("name", name)
        .with("age", 36)
        .with("home", address("London"))
        .with("favorite", Value::enumeration("Color", "GREEN"))
        .with("tags", Value::list(vec![Value::from("x"), Value::I64(1)]))
        .with(
            "scores",
            int_array(2, vec![ints(&[1, 2]), Value::Null, ints(&[])]),
        )
        .with(
            "attributes",
            Value::map(vec![(Value::from("k"), Value::F64(0.5))]),
        )
        .with("extra", Value::Char('z'))
}
