use super::*;
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

fn hash_of(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn equality_and_hash_follow_the_wrapped_data() {
    let a = Value::Text("otavio".to_string());
    let b = Value::Text("otavio".to_string());

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(a, Value::Text("ada".to_string()));
}

#[test]
fn same_number_in_different_variants_is_not_equal() {
    assert_ne!(Value::Int(1), Value::Uint(1));
    assert_ne!(hash_of(&Value::Int(1)), hash_of(&Value::Uint(1)));
}

#[test]
fn tags_label_every_variant() {
    assert_eq!(Value::Null.tag().label(), "Null");
    assert_eq!(Value::Int(1).tag().label(), "Int");
    assert_eq!(Value::List(vec![]).tag().label(), "List");
    assert_eq!(Value::blob([1, 2, 3]).tag().label(), "Blob");
}

#[test]
fn accessors_match_their_variant_only() {
    let value = Value::Text("x".to_string());

    assert_eq!(value.as_text(), Some("x"));
    assert_eq!(value.as_int(), None);
    assert!(!value.is_null());
    assert!(Value::Null.is_null());
}

#[test]
fn conversions_wrap_the_expected_variant() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(7_i32), Value::Int(7));
    assert_eq!(Value::from(7_u64), Value::Uint(7));
    assert_eq!(Value::from("x"), Value::Text("x".to_string()));
    assert_eq!(
        Value::from(vec![1_i64, 2]),
        Value::List(vec![Value::Int(1), Value::Int(2)])
    );
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some(3_i64)), Value::Int(3));
}

#[test]
fn get_returns_the_value_itself_for_the_identity_target() {
    let value = Value::List(vec![Value::Int(1)]);
    let out: Value = value.get().unwrap();

    assert_eq!(out, value);
}

#[test]
fn get_coerces_through_the_registry() {
    assert_eq!(Value::Int(10).get::<String>().unwrap(), "10");
    assert_eq!(Value::Text("10".to_string()).get::<i64>().unwrap(), 10);
}

#[test]
fn nested_structures_compare_recursively() {
    let left = Value::Map(vec![(
        Value::Text("k".to_string()),
        Value::List(vec![Value::Int(1)]),
    )]);
    let right = Value::Map(vec![(
        Value::Text("k".to_string()),
        Value::List(vec![Value::Int(1)]),
    )]);

    assert_eq!(left, right);
    assert_eq!(hash_of(&left), hash_of(&right));
}
