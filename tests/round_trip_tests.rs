// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Round-trip integration tests.
//!
//! Tests cover:
//! - Objects with nested objects, enums, collections, arrays and `any` fields
//! - Aliased type tags surviving a round trip
//! - Boxing rule at field level
//! - Wire errors surfacing to the caller
//! - Explicit marshallers emitting untagged text inside dynamic containers

mod common;

use std::sync::Arc;

use common::{person, shop_factory};
use marshalgen::{
    ArraySignature, ExposedType, FactoryGenerator, FieldMapping, MarshalError, Marshaller,
    MarshallerFactory, MarshallerProviders, MarshallingSession, ObjectValue, PrimitiveType,
    Result, TypeCatalog, TypeRef, Value, WireValue,
};

/// Writes `Money` objects as their bare `amount` string.
#[derive(Debug)]
struct MoneyMarshaller;

impl Marshaller for MoneyMarshaller {
    fn type_handled(&self) -> TypeRef {
        TypeRef::named("Money")
    }

    fn marshall_value(&self, value: &Value, session: &MarshallingSession<'_>) -> Result<String> {
        let amount = value
            .as_object()
            .and_then(|o| o.get("amount"))
            .ok_or_else(|| MarshalError::mismatch("Money", "amount", value.kind_name()))?;
        session.marshall_as(&TypeRef::String, amount, "Money.amount")
    }

    fn demarshall_value(&self, wire: &WireValue, session: &MarshallingSession<'_>) -> Result<Value> {
        let amount = session.demarshall_as(&TypeRef::String, wire, "Money.amount")?;
        Ok(Value::Object(ObjectValue::new("Money").with("amount", amount)))
    }
}

fn wallet_factory() -> MarshallerFactory {
    let catalog = TypeCatalog::with_builtins()
        .with_type(ExposedType::opaque("Money").with_marshaller("MoneyMarshaller"))
        .with_type(ExposedType::object(
            "Wallet",
            vec![
                FieldMapping::new("main", TypeRef::named("Money")),
                FieldMapping::new("coins", TypeRef::List),
                FieldMapping::new("spare", TypeRef::Any),
            ],
        ));
    let mut providers = MarshallerProviders::builtin();
    providers.register("MoneyMarshaller", || -> Arc<dyn Marshaller> {
        Arc::new(MoneyMarshaller)
    });
    FactoryGenerator::with_providers(catalog, providers)
        .build_factory("demo", "WalletMarshallers")
        .unwrap()
}

fn money(amount: &str) -> Value {
    Value::Object(ObjectValue::new("Money").with("amount", amount))
}

#[test]
fn test_person_round_trip() {
    let factory = shop_factory();
    let value = Value::Object(person("Ada"));

    let text = factory.marshall(&value).unwrap();
    assert!(text.starts_with(r#"{"^EncodedType":"Person","name":"Ada","age":36,"#));
    assert_eq!(factory.demarshall(&text).unwrap(), value);
}

#[test]
fn test_order_round_trip_drops_read_only_field() {
    let factory = shop_factory();
    let order = ObjectValue::new("Order")
        .with("id", Value::I64(9_007_199_254_740_993))
        .with("buyer", Value::Object(person("Ada")))
        .with(
            "items",
            Value::array(
                ArraySignature::new(TypeRef::String, 1),
                vec![Value::from("apple"), Value::Null],
            ),
        )
        .with("quantities", Value::Null)
        .with("matrix", Value::Null)
        .with("owners", Value::Null)
        .with("created", Value::I64(1_700_000_000));

    let text = factory.marshall(&Value::Object(order.clone())).unwrap();
    assert!(text.contains(r#""created":1700000000"#));
    assert!(text.contains(r#""id":9007199254740993"#));

    let decoded = factory.demarshall(&text).unwrap();
    let decoded = decoded.as_object().unwrap();
    assert_eq!(decoded.get("created"), None);
    assert_eq!(decoded.get("id"), order.get("id"));
    assert_eq!(decoded.get("buyer"), order.get("buyer"));
    assert_eq!(decoded.get("items"), order.get("items"));
}

#[test]
fn test_alias_tags_round_trip() {
    let factory = shop_factory();
    let text = std::fs::read_to_string(common::fixture_path("person.json")).unwrap();

    let value = factory.demarshall(text.trim()).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.type_name, "Customer");
    assert_eq!(
        obj.get("favorite"),
        Some(&Value::enumeration("Colour", "GREEN"))
    );
    assert_eq!(factory.marshall(&value).unwrap(), text.trim());
}

#[test]
fn test_null_for_primitive_field_fails() {
    let factory = shop_factory();
    let mut ada = person("Ada");
    ada.set("age", Value::Null);
    let err = factory.marshall(&Value::Object(ada)).unwrap_err();
    assert!(matches!(err, MarshalError::TypeMismatch { .. }));
}

#[test]
fn test_unknown_enum_constant_fails() {
    let factory = shop_factory();
    let err = factory
        .demarshall(r#"{"^EncodedType":"Color","^EnumStringValue":"PURPLE"}"#)
        .unwrap_err();
    assert!(matches!(err, MarshalError::UnknownEnumVariant { .. }));
}

#[test]
fn test_unknown_tag_fails() {
    let factory = shop_factory();
    let err = factory
        .demarshall(r#"{"^EncodedType":"Spaceship","warp":9}"#)
        .unwrap_err();
    assert!(matches!(err, MarshalError::UnknownNestedMarshaller { .. }));
}

#[test]
fn test_malformed_wire_text() {
    let factory = shop_factory();
    let err = factory.demarshall(r#"{"^EncodedType":"Person""#).unwrap_err();
    assert!(matches!(err, MarshalError::Parse { .. }));
}

#[test]
fn test_enum_field_rejects_other_enum_type() {
    let factory = shop_factory();
    let mut ada = person("Ada");
    ada.set("favorite", Value::Object(ObjectValue::new("Address")));
    assert!(factory.marshall(&Value::Object(ada)).is_err());
}

#[test]
fn test_collection_aliases_decode_as_list() {
    let factory = shop_factory();
    let value = factory
        .demarshall(r#"{"^EncodedType":"array_list","^Value":["a","b"]}"#)
        .unwrap();
    assert_eq!(value, Value::list(vec![Value::from("a"), Value::from("b")]));
}

#[test]
fn test_declared_boxed_scalar() {
    let factory = shop_factory();
    let boxed = TypeRef::Boxed(PrimitiveType::I64);
    assert_eq!(factory.marshall_as(&boxed, &Value::Null).unwrap(), "null");
    assert_eq!(factory.demarshall_as(&boxed, "42").unwrap(), Value::I64(42));
}

#[test]
fn test_explicit_marshaller_output_is_tagged_in_list() {
    let factory = wallet_factory();
    let coins = Value::list(vec![money("12.50"), Value::from("12.50")]);

    let text = factory.marshall(&coins).unwrap();
    assert_eq!(
        text,
        r#"{"^EncodedType":"list","^Value":[{"^EncodedType":"Money","^Value":"12.50"},"12.50"]}"#
    );
    assert_eq!(factory.demarshall(&text).unwrap(), coins);
}

#[test]
fn test_explicit_marshaller_round_trip_in_fields() {
    let factory = wallet_factory();
    let wallet = Value::Object(
        ObjectValue::new("Wallet")
            .with("main", money("3.00"))
            .with("coins", Value::list(vec![money("0.25")]))
            .with("spare", money("1.00")),
    );

    let text = factory.marshall(&wallet).unwrap();
    assert!(text.contains(r#""main":{"^EncodedType":"Money","^Value":"3.00"}"#));
    assert_eq!(factory.demarshall(&text).unwrap(), wallet);
}

#[test]
fn test_missing_nullable_fields_round_trip() {
    let factory = shop_factory();
    let home = Value::Object(
        ObjectValue::new("Address")
            .with("street", "1 Main St")
            .with("city", "Paris"),
    );

    let text = factory.marshall(&home).unwrap();
    assert!(text.ends_with(r#""zip":null}"#));
    assert_eq!(factory.demarshall(&text).unwrap(), home);

    let mut ada = person("Ada");
    ada.set("home", home);
    ada.fields.remove("extra");
    let value = Value::Object(ada);
    assert_eq!(factory.demarshall(&factory.marshall(&value).unwrap()).unwrap(), value);
}

#[test]
fn test_enum_field_accepts_bare_constant_name() {
    let factory = shop_factory();
    assert_eq!(
        factory.demarshall_as(&TypeRef::named("Color"), r#""RED""#).unwrap(),
        Value::enumeration("Color", "RED")
    );

    let ada = Value::Object(person("Ada"));
    let text = factory
        .marshall(&ada)
        .unwrap()
        .replace(r#"{"^EncodedType":"Color","^EnumStringValue":"GREEN"}"#, r#""GREEN""#);
    assert!(text.contains(r#""favorite":"GREEN""#));
    assert_eq!(factory.demarshall(&text).unwrap(), ada);
}
