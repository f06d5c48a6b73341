//! floedb — a vendor-neutral NoSQL condition algebra and value-coercion
//! core.
//!
//! Callers build immutable condition trees over named values, compose them
//! with flat boolean operators, and read stored payloads back out through a
//! pluggable coercion registry. Executing a finished query against a store
//! is an adapter's responsibility, not this crate's.
//!
//! ## Crate layout
//! - `core`: runtime data model — values, attributes, conditions, queries,
//!   and the coercion registry.
//!
//! The `prelude` module mirrors the surface used inside adapter code.

pub use floedb_core as core;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::error::Error;

///
/// Adapter Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        attribute::Attribute,
        coerce::{CoerceError, ReaderRegistry, TypedReader, ValueReader},
        condition::{Condition, ConditionKind},
        error::ArgumentError,
        query::{ConditionExt as _, DeleteQuery, Direction, FieldExt as _, SelectQuery, Sort},
        types::{Date, Float64, Timestamp},
        value::{Value, ValueTag},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// TESTS
///
