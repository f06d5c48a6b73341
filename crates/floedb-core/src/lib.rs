//! Core model for floedb: attributes, values, the coercion registry, the
//! condition algebra, and the query containers handed to execution adapters.
#![warn(unreachable_pub)]

pub mod attribute;
pub mod coerce;
pub mod condition;
pub mod error;
pub mod query;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, registries, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        attribute::Attribute,
        condition::{Condition, ConditionKind},
        query::{ConditionExt as _, DeleteQuery, Direction, FieldExt as _, SelectQuery, Sort},
        types::{Date, Float64, Timestamp},
        value::Value,
    };
}
