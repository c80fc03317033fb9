//! Typed field access over one wire record.
//!
//! Every accessor treats a missing key and an explicit `null` the same way:
//! scalars come back as `None`, lists as empty. A present value of the wrong
//! shape is a [`DecodeError::FieldTypeMismatch`] naming the field.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::errors::DecodeError;
use crate::domain::events::BookLevel;

/// Read-only view of a tagged record's fields.
#[derive(Debug, Clone, Copy)]
pub struct RecordReader<'a> {
    tag: &'a str,
    fields: &'a Map<String, Value>,
}

impl<'a> RecordReader<'a> {
    /// Wrap a record object whose tag has already been extracted.
    #[must_use]
    pub const fn new(tag: &'a str, fields: &'a Map<String, Value>) -> Self {
        Self { tag, fields }
    }

    /// The record's tag.
    #[must_use]
    pub const fn tag(&self) -> &'a str {
        self.tag
    }

    /// Optional string field.
    ///
    /// # Errors
    ///
    /// Returns `FieldTypeMismatch` if the value is not a string.
    pub fn string(&self, field: &'static str) -> Result<Option<String>, DecodeError> {
        self.optional(field, "string")
    }

    /// Optional floating-point field. Integers are widened.
    ///
    /// # Errors
    ///
    /// Returns `FieldTypeMismatch` if the value is not a number.
    pub fn float(&self, field: &'static str) -> Result<Option<f64>, DecodeError> {
        self.optional(field, "number")
    }

    /// Optional integer field (exchange IDs).
    ///
    /// # Errors
    ///
    /// Returns `FieldTypeMismatch` if the value is not an integer.
    pub fn integer(&self, field: &'static str) -> Result<Option<i64>, DecodeError> {
        self.optional(field, "integer")
    }

    /// Optional epoch-milliseconds timestamp field.
    ///
    /// # Errors
    ///
    /// Returns `FieldTypeMismatch` if the value is not an integer.
    pub fn millis(&self, field: &'static str) -> Result<Option<i64>, DecodeError> {
        self.optional(field, "epoch milliseconds")
    }

    /// Optional 32-bit integer field (single condition codes).
    ///
    /// # Errors
    ///
    /// Returns `FieldTypeMismatch` if the value is not an integer in range.
    pub fn code(&self, field: &'static str) -> Result<Option<i32>, DecodeError> {
        self.optional(field, "integer code")
    }

    /// Condition code list.
    ///
    /// # Errors
    ///
    /// Returns `FieldTypeMismatch` if the value is not an array of integers.
    pub fn codes(&self, field: &'static str) -> Result<Vec<i32>, DecodeError> {
        self.list(field, "array of integer codes")
    }

    /// Book side as a list of `[price, size]` pairs.
    ///
    /// # Errors
    ///
    /// Returns `FieldTypeMismatch` if the value is not an array of numeric
    /// pairs.
    pub fn levels(&self, field: &'static str) -> Result<Vec<BookLevel>, DecodeError> {
        let pairs: Vec<[f64; 2]> = self.list(field, "array of [price, size] pairs")?;
        Ok(pairs.into_iter().map(BookLevel::from).collect())
    }

    fn list<T: DeserializeOwned>(
        &self,
        field: &'static str,
        expected: &'static str,
    ) -> Result<Vec<T>, DecodeError> {
        Ok(self.optional(field, expected)?.unwrap_or_default())
    }

    fn optional<T: DeserializeOwned>(
        &self,
        field: &'static str,
        expected: &'static str,
    ) -> Result<Option<T>, DecodeError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value).map(Some).map_err(|_| {
                DecodeError::FieldTypeMismatch {
                    tag: self.tag.to_string(),
                    field,
                    expected,
                    value: value.clone(),
                }
            }),
        }
    }
}
