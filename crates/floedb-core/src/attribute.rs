use crate::{coerce::CoerceError, error::ArgumentError, value::Value};
use serde::{Deserialize, Serialize};
use std::any::Any;

///
/// Attribute
///
/// Immutable name/value pair, the atomic unit of a record. The name is
/// non-empty; an explicitly-null payload is `Value::Null`, never an absent
/// value. Equality and hashing are structural.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Attribute {
    name: String,
    value: Value,
}

impl Attribute {
    /// Construct an attribute; rejects an empty name.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Result<Self, ArgumentError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ArgumentError::Required {
                name: "attribute name",
            });
        }

        Ok(Self {
            name,
            value: value.into(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Coerce the payload to `T` through the reader registry.
    pub fn get<T: Any + Clone>(&self) -> Result<T, CoerceError> {
        self.value.get()
    }

    #[must_use]
    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        let err = Attribute::new("", 1_i64).unwrap_err();
        assert_eq!(
            err,
            ArgumentError::Required {
                name: "attribute name"
            }
        );
    }

    #[test]
    fn null_payload_is_explicit() {
        let attribute = Attribute::new("deleted_at", Value::Null).unwrap();
        assert!(attribute.value().is_null());
    }

    #[test]
    fn get_delegates_to_the_registry() {
        let attribute = Attribute::new("age", 10_i64).unwrap();
        assert_eq!(attribute.get::<String>().unwrap(), "10");
    }

    #[test]
    fn equality_is_structural() {
        let a = Attribute::new("name", "otavio").unwrap();
        let b = Attribute::new("name", "otavio").unwrap();
        assert_eq!(a, b);
    }
}
