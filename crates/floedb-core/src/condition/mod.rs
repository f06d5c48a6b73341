#[cfg(test)]
mod tests;

use crate::{attribute::Attribute, error::ArgumentError, query::SelectQuery, value::Value};
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, Not};

///
/// ConditionKind
///
/// Closed operator taxonomy. Each kind carries the reserved field name used
/// when a condition tree is keyed into a generic name/value container by a
/// downstream translator.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ConditionKind {
    Equals,
    GreaterThan,
    GreaterEqualsThan,
    LesserThan,
    LesserEqualsThan,
    In,
    Like,
    Between,
    And,
    Or,
    Not,
    Subquery,
}

impl ConditionKind {
    /// Reserved container-key name for this operator.
    #[must_use]
    pub const fn name_field(self) -> &'static str {
        match self {
            Self::Equals => "_EQUALS",
            Self::GreaterThan => "_GREATER_THAN",
            Self::GreaterEqualsThan => "_GREATER_EQUALS_THAN",
            Self::LesserThan => "_LESSER_THAN",
            Self::LesserEqualsThan => "_LESSER_EQUALS_THAN",
            Self::In => "_IN",
            Self::Like => "_LIKE",
            Self::Between => "_BETWEEN",
            Self::And => "_AND",
            Self::Or => "_OR",
            Self::Not => "_NOT",
            Self::Subquery => "_SUBQUERY",
        }
    }

    /// Whether this kind carries other conditions or a sub-query rather
    /// than a leaf attribute.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not | Self::Subquery)
    }
}

///
/// Condition
///
/// Immutable condition tree node. Each variant carries exactly the payload
/// its operator expects — a leaf attribute, an ordered child list, a single
/// negated child, or a sub-query — so unwrapping needs no runtime shape
/// inspection. Execution adapters pattern-match on the variants and
/// translate leaves into native predicates, composites into native boolean
/// combinators.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Condition {
    Equals(Attribute),
    GreaterThan(Attribute),
    GreaterEqualsThan(Attribute),
    LesserThan(Attribute),
    LesserEqualsThan(Attribute),
    In(Attribute),
    Like(Attribute),
    Between(Attribute),
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
    Subquery(Box<SelectQuery>),
}

impl Condition {
    // --- Leaf constructors ---

    #[must_use]
    pub const fn eq(attribute: Attribute) -> Self {
        Self::Equals(attribute)
    }

    #[must_use]
    pub const fn gt(attribute: Attribute) -> Self {
        Self::GreaterThan(attribute)
    }

    #[must_use]
    pub const fn gte(attribute: Attribute) -> Self {
        Self::GreaterEqualsThan(attribute)
    }

    #[must_use]
    pub const fn lt(attribute: Attribute) -> Self {
        Self::LesserThan(attribute)
    }

    #[must_use]
    pub const fn lte(attribute: Attribute) -> Self {
        Self::LesserEqualsThan(attribute)
    }

    #[must_use]
    pub const fn in_(attribute: Attribute) -> Self {
        Self::In(attribute)
    }

    #[must_use]
    pub const fn like(attribute: Attribute) -> Self {
        Self::Like(attribute)
    }

    /// Range condition over a two-element list payload.
    ///
    /// The attribute must wrap a `Value::List` holding exactly the lower and
    /// upper bound, eagerly counted; anything else is rejected. The
    /// attribute is stored unchanged.
    pub fn between(attribute: Attribute) -> Result<Self, ArgumentError> {
        match attribute.value() {
            Value::List(items) if items.len() == 2 => Ok(Self::Between(attribute)),
            Value::List(items) => Err(ArgumentError::invalid(format!(
                "between requires exactly two bounds, got {}",
                items.len()
            ))),
            other => Err(ArgumentError::invalid(format!(
                "between requires a two-element list, got {}",
                other.tag().label()
            ))),
        }
    }

    // --- Composite constructors ---

    /// All conditions must hold; input order is preserved.
    #[must_use]
    pub const fn all(conditions: Vec<Self>) -> Self {
        Self::And(conditions)
    }

    /// Any condition may hold; input order is preserved.
    #[must_use]
    pub const fn any(conditions: Vec<Self>) -> Self {
        Self::Or(conditions)
    }

    /// Embed a sub-query as a condition.
    #[must_use]
    pub fn subquery(query: SelectQuery) -> Self {
        Self::Subquery(Box::new(query))
    }

    // --- Composition ---

    /// Join with `other` under AND.
    ///
    /// When `self` already is an AND node the child list grows in place, so
    /// `a.and(b).and(c)` is one flat node with children `[a, b, c]`, never a
    /// nested pair tree.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut children) => {
                children.push(other);
                Self::And(children)
            }
            this => Self::And(vec![this, other]),
        }
    }

    /// Join with `other` under OR; flat like [`Condition::and`].
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut children) => {
                children.push(other);
                Self::Or(children)
            }
            this => Self::Or(vec![this, other]),
        }
    }

    /// Negate. Negating a NOT unwraps it, so `negate` is its own inverse.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Not(inner) => *inner,
            this => Self::Not(Box::new(this)),
        }
    }

    // --- Introspection ---

    /// Operator taxonomy entry for this node.
    #[must_use]
    pub const fn kind(&self) -> ConditionKind {
        match self {
            Self::Equals(_) => ConditionKind::Equals,
            Self::GreaterThan(_) => ConditionKind::GreaterThan,
            Self::GreaterEqualsThan(_) => ConditionKind::GreaterEqualsThan,
            Self::LesserThan(_) => ConditionKind::LesserThan,
            Self::LesserEqualsThan(_) => ConditionKind::LesserEqualsThan,
            Self::In(_) => ConditionKind::In,
            Self::Like(_) => ConditionKind::Like,
            Self::Between(_) => ConditionKind::Between,
            Self::And(_) => ConditionKind::And,
            Self::Or(_) => ConditionKind::Or,
            Self::Not(_) => ConditionKind::Not,
            Self::Subquery(_) => ConditionKind::Subquery,
        }
    }

    /// Reserved container-key name for this node's operator.
    #[must_use]
    pub const fn name_field(&self) -> &'static str {
        self.kind().name_field()
    }

    /// Leaf attribute, when this node is a comparison.
    #[must_use]
    pub const fn attribute(&self) -> Option<&Attribute> {
        match self {
            Self::Equals(a)
            | Self::GreaterThan(a)
            | Self::GreaterEqualsThan(a)
            | Self::LesserThan(a)
            | Self::LesserEqualsThan(a)
            | Self::In(a)
            | Self::Like(a)
            | Self::Between(a) => Some(a),
            _ => None,
        }
    }

    /// Ordered children, when this node is an AND/OR composite.
    #[must_use]
    pub fn children(&self) -> Option<&[Condition]> {
        match self {
            Self::And(children) | Self::Or(children) => Some(children),
            _ => None,
        }
    }

    /// The stored lower and upper bound, when this node is a BETWEEN.
    ///
    /// Construction guards the two-element shape; a tree deserialized from
    /// an untrusted source may not uphold it, in which case this is `None`.
    #[must_use]
    pub fn between_bounds(&self) -> Option<(&Value, &Value)> {
        let Self::Between(attribute) = self else {
            return None;
        };

        match attribute.value() {
            Value::List(items) if items.len() == 2 => Some((&items[0], &items[1])),
            _ => None,
        }
    }

    // --- Normalization ---

    /// Canonicalize: recursively flatten nested same-operator composites,
    /// collapse single-child AND/OR, and strip double negation. Child order
    /// is preserved — the algebra's contract fixes it, so no sorting.
    #[must_use]
    pub fn normalize(self) -> Self {
        match self {
            Self::And(children) => {
                let mut flat = Self::normalize_children(children, |c| matches!(c, Self::And(_)));
                if flat.len() == 1 {
                    flat.remove(0)
                } else {
                    Self::And(flat)
                }
            }
            Self::Or(children) => {
                let mut flat = Self::normalize_children(children, |c| matches!(c, Self::Or(_)));
                if flat.len() == 1 {
                    flat.remove(0)
                } else {
                    Self::Or(flat)
                }
            }
            Self::Not(inner) => match inner.normalize() {
                Self::Not(double) => *double,
                normalized => Self::Not(Box::new(normalized)),
            },
            leaf => leaf,
        }
    }

    /// Helper to normalize and flatten nested `And` or `Or` children.
    fn normalize_children(children: Vec<Self>, flatten_if: fn(&Self) -> bool) -> Vec<Self> {
        let mut flat = Vec::with_capacity(children.len());

        for child in children {
            let normalized = child.normalize();
            if flatten_if(&normalized) {
                if let Self::And(nested) | Self::Or(nested) = normalized {
                    flat.extend(nested);
                }
            } else {
                flat.push(normalized);
            }
        }

        flat
    }
}

///
/// Bit Operations
/// allow us to use & | and ! on conditions
///

impl BitAnd for Condition {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for Condition {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl Not for Condition {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}
