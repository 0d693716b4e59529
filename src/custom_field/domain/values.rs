//! Per-user custom field values keyed by internal name.
//!
//! A user's values live in a single JSON object (the `users.custom_fields`
//! column), one entry per internal name. `null` means the value is unset.

use super::{FieldType, UserCustomField};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a single custom field value was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldValueError {
    /// No custom field has this internal name.
    #[error("no custom field named '{0}'")]
    UnknownField(String),

    /// More than one custom field derives this internal name.
    #[error("'{0}' matches more than one custom field")]
    AmbiguousField(String),

    /// The JSON type does not match the field type.
    #[error("expected a {expected} value")]
    TypeMismatch {
        /// Field type the value should match.
        expected: FieldType,
    },

    /// A date value is not a `YYYY-MM-DD` calendar date.
    #[error("'{0}' is not a valid date")]
    InvalidDate(String),

    /// A dropdown value is not one of the field's options.
    #[error("'{0}' is not one of the field options")]
    UnknownOption(String),

    /// A multi-dropdown value selects the same option twice.
    #[error("option '{0}' is selected more than once")]
    RepeatedOption(String),
}

impl UserCustomField {
    /// Checks that `value` is acceptable for this field.
    ///
    /// # Errors
    ///
    /// Returns the [`FieldValueError`] describing the first mismatch.
    pub fn check_value(&self, value: &Value) -> Result<(), FieldValueError> {
        let field_type = self.field_type();
        let mismatch = || FieldValueError::TypeMismatch {
            expected: field_type,
        };
        match (field_type, value) {
            (_, Value::Null)
            | (FieldType::Text, Value::String(_))
            | (FieldType::Number, Value::Number(_))
            | (FieldType::Checkbox, Value::Bool(_)) => Ok(()),
            (FieldType::Date, Value::String(text)) => NaiveDate::parse_from_str(text, DATE_FORMAT)
                .map(|_| ())
                .map_err(|_| FieldValueError::InvalidDate(text.clone())),
            (FieldType::Dropdown, Value::String(choice)) => self.check_option(choice),
            (FieldType::MultiDropdown, Value::Array(items)) => {
                let mut seen = HashSet::with_capacity(items.len());
                for item in items {
                    let choice = item.as_str().ok_or_else(mismatch)?;
                    self.check_option(choice)?;
                    if !seen.insert(choice) {
                        return Err(FieldValueError::RepeatedOption(choice.to_owned()));
                    }
                }
                Ok(())
            }
            _ => Err(mismatch()),
        }
    }

    fn check_option(&self, choice: &str) -> Result<(), FieldValueError> {
        if self.options().contains(choice) {
            Ok(())
        } else {
            Err(FieldValueError::UnknownOption(choice.to_owned()))
        }
    }
}

/// A user's custom field values, keyed by internal name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomFieldValues(Map<String, Value>);

impl CustomFieldValues {
    /// Creates an empty value set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing JSON object.
    #[must_use]
    pub const fn from_map(values: Map<String, Value>) -> Self {
        Self(values)
    }

    /// Sets the value stored under `internal_name`.
    #[must_use]
    pub fn with(mut self, internal_name: impl Into<String>, value: Value) -> Self {
        self.0.insert(internal_name.into(), value);
        self
    }

    /// Returns the value stored under `internal_name`.
    #[must_use]
    pub fn get(&self, internal_name: &str) -> Option<&Value> {
        self.0.get(internal_name)
    }

    /// Checks every entry against the matching field in `fields`.
    ///
    /// A key shared by several fields is rejected whatever their order.
    ///
    /// # Errors
    ///
    /// Returns [`FieldValueErrors`] with one entry per rejected key.
    pub fn validate(&self, fields: &[UserCustomField]) -> Result<(), FieldValueErrors> {
        let errors: Vec<(String, FieldValueError)> = self
            .0
            .iter()
            .filter_map(|(key, value)| {
                let mut matching = fields
                    .iter()
                    .filter(|field| field.internal_name().as_str() == key);
                let outcome = match (matching.next(), matching.next()) {
                    (None, _) => Err(FieldValueError::UnknownField(key.clone())),
                    (Some(field), None) => field.check_value(value),
                    (Some(_), Some(_)) => Err(FieldValueError::AmbiguousField(key.clone())),
                };
                outcome.err().map(|err| (key.clone(), err))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FieldValueErrors(errors))
        }
    }
}

/// Rejected custom field values, keyed by internal name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid custom field values: {}", describe(.0))]
pub struct FieldValueErrors(Vec<(String, FieldValueError)>);

impl FieldValueErrors {
    /// Returns the error recorded for `internal_name`.
    #[must_use]
    pub fn get(&self, internal_name: &str) -> Option<&FieldValueError> {
        self.0
            .iter()
            .find(|(key, _)| key == internal_name)
            .map(|(_, err)| err)
    }

    /// Returns the number of rejected values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no value was rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn describe(errors: &[(String, FieldValueError)]) -> String {
    errors
        .iter()
        .map(|(key, err)| format!("{key}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}
