use crate::{condition::Condition, error::ArgumentError};
use serde::{Deserialize, Serialize};

///
/// Query containers
///
/// Mutable builders selecting rows from one collection, handed to an
/// execution adapter once finished. Single-writer; share finished queries,
/// not the builder.
///

///
/// ConditionSlot
///
/// Storage hook letting [`ConditionExt`] share condition attachment across
/// query types.
///

pub trait ConditionSlot {
    fn condition_slot(&mut self) -> &mut Option<Condition>;
}

///
/// ConditionExt
///
/// Condition attachment over any type with a condition slot. The first call
/// installs the condition; later calls compose through the algebra and
/// inherit its flattening rule. Once conditioned, a query never reverts to
/// empty.
///

pub trait ConditionExt: ConditionSlot {
    fn and(&mut self, condition: Condition) -> &mut Self
    where
        Self: Sized,
    {
        let slot = self.condition_slot();
        *slot = Some(match slot.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });

        self
    }

    fn or(&mut self, condition: Condition) -> &mut Self
    where
        Self: Sized,
    {
        let slot = self.condition_slot();
        *slot = Some(match slot.take() {
            Some(existing) => existing.or(condition),
            None => condition,
        });

        self
    }
}

impl<T: ConditionSlot> ConditionExt for T {}

///
/// FieldSlot
///

pub trait FieldSlot {
    fn field_slot(&mut self) -> &mut Vec<String>;
}

///
/// FieldExt
///
/// Projection-field mutation over any type with a field slot. The list is
/// ordered; duplicates are permitted, so callers wanting set semantics
/// de-duplicate before adding.
///

pub trait FieldExt: FieldSlot {
    /// Append a field; rejects an empty name.
    fn add(&mut self, field: impl Into<String>) -> Result<&mut Self, ArgumentError>
    where
        Self: Sized,
    {
        let field = field.into();
        if field.is_empty() {
            return Err(ArgumentError::Required { name: "field name" });
        }
        self.field_slot().push(field);

        Ok(self)
    }

    fn add_all<I>(&mut self, fields: I) -> Result<&mut Self, ArgumentError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
        Self: Sized,
    {
        for field in fields {
            self.add(field)?;
        }

        Ok(self)
    }

    /// Remove the first matching entry; no-op when absent.
    fn remove(&mut self, field: &str) -> &mut Self
    where
        Self: Sized,
    {
        let slot = self.field_slot();
        if let Some(index) = slot.iter().position(|f| f == field) {
            slot.remove(index);
        }

        self
    }

    fn remove_all<'a, I>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
        Self: Sized,
    {
        for field in fields {
            self.remove(field);
        }

        self
    }
}

impl<T: FieldSlot> FieldExt for T {}

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

///
/// Sort
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Sort {
    pub field: String,
    pub direction: Direction,
}

///
/// SelectQuery
///
/// Selects rows from one collection: optional root condition, projection
/// fields, sort keys, and paging.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SelectQuery {
    collection: String,
    condition: Option<Condition>,
    fields: Vec<String>,
    sorts: Vec<Sort>,
    skip: Option<u64>,
    limit: Option<u64>,
}

impl SelectQuery {
    /// Start an empty query over `collection`; rejects an empty name.
    pub fn new(collection: impl Into<String>) -> Result<Self, ArgumentError> {
        let collection = collection.into();
        if collection.is_empty() {
            return Err(ArgumentError::Required { name: "collection" });
        }

        Ok(Self {
            collection,
            condition: None,
            fields: Vec::new(),
            sorts: Vec::new(),
            skip: None,
            limit: None,
        })
    }

    /// Start a query over `collection` with a root condition installed.
    pub fn with_condition(
        collection: impl Into<String>,
        condition: Condition,
    ) -> Result<Self, ArgumentError> {
        let mut query = Self::new(collection)?;
        query.condition = Some(condition);

        Ok(query)
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    #[must_use]
    pub const fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn sorts(&self) -> &[Sort] {
        &self.sorts
    }

    #[must_use]
    pub const fn skip(&self) -> Option<u64> {
        self.skip
    }

    #[must_use]
    pub const fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Append a sort key; rejects an empty field name.
    pub fn sort(
        &mut self,
        field: impl Into<String>,
        direction: Direction,
    ) -> Result<&mut Self, ArgumentError> {
        let field = field.into();
        if field.is_empty() {
            return Err(ArgumentError::Required { name: "sort field" });
        }
        self.sorts.push(Sort { field, direction });

        Ok(self)
    }

    pub fn set_skip(&mut self, skip: u64) -> &mut Self {
        self.skip = Some(skip);
        self
    }

    pub fn set_limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }
}

impl ConditionSlot for SelectQuery {
    fn condition_slot(&mut self) -> &mut Option<Condition> {
        &mut self.condition
    }
}

impl FieldSlot for SelectQuery {
    fn field_slot(&mut self) -> &mut Vec<String> {
        &mut self.fields
    }
}

///
/// DeleteQuery
///
/// Selects rows from one collection for deletion: optional root condition
/// plus the fields to clear when the adapter supports partial deletes.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct DeleteQuery {
    collection: String,
    condition: Option<Condition>,
    fields: Vec<String>,
}

impl DeleteQuery {
    /// Start an empty delete over `collection`; rejects an empty name.
    pub fn new(collection: impl Into<String>) -> Result<Self, ArgumentError> {
        let collection = collection.into();
        if collection.is_empty() {
            return Err(ArgumentError::Required { name: "collection" });
        }

        Ok(Self {
            collection,
            condition: None,
            fields: Vec::new(),
        })
    }

    /// Start a delete over `collection` with a root condition installed.
    pub fn with_condition(
        collection: impl Into<String>,
        condition: Condition,
    ) -> Result<Self, ArgumentError> {
        let mut query = Self::new(collection)?;
        query.condition = Some(condition);

        Ok(query)
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    #[must_use]
    pub const fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl ConditionSlot for DeleteQuery {
    fn condition_slot(&mut self) -> &mut Option<Condition> {
        &mut self.condition
    }
}

impl FieldSlot for DeleteQuery {
    fn field_slot(&mut self) -> &mut Vec<String> {
        &mut self.fields
    }
}

///
/// TESTS
///
