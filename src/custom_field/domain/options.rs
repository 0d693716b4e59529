//! Dropdown options and classification of raw option input.

use super::{CustomFieldDomainError, FieldType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered list of selectable values for a choice field.
///
/// Empty for every non-choice field type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldOptions(Vec<String>);

impl FieldOptions {
    /// Returns an empty option list.
    #[must_use]
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    /// Builds options for `field_type`, enforcing the choice/options coupling.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldDomainError::MissingOptions`] for a choice type
    /// with no options, or [`CustomFieldDomainError::UnexpectedOptions`] for
    /// a non-choice type with some.
    pub fn for_type(
        field_type: FieldType,
        values: impl IntoIterator<Item = String>,
    ) -> Result<Self, CustomFieldDomainError> {
        let options = Self(values.into_iter().collect());
        match (field_type.is_choice(), options.is_empty()) {
            (true, true) => Err(CustomFieldDomainError::MissingOptions(
                field_type.as_str().to_owned(),
            )),
            (false, false) => Err(CustomFieldDomainError::UnexpectedOptions(
                field_type.as_str().to_owned(),
            )),
            _ => Ok(options),
        }
    }

    /// Returns the options as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` when there are no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when `value` is one of the options.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|option| option == value)
    }
}

/// Shape of caller-supplied options before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOptions {
    /// Absent, `null`, `[]` or `""`.
    Blank,
    /// A non-empty array made only of strings.
    List(Vec<String>),
    /// Anything else: a bare string, number, object, or mixed array.
    Malformed,
}

impl RawOptions {
    /// Classifies an optional JSON value.
    #[must_use]
    pub fn classify(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Blank,
            Some(Value::String(text)) if text.is_empty() => Self::Blank,
            Some(Value::Array(items)) if items.is_empty() => Self::Blank,
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .map_or(Self::Malformed, Self::List),
            Some(_) => Self::Malformed,
        }
    }

    /// Returns `true` for [`RawOptions::Blank`].
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}
