//! Closed set of custom field types.

use super::ParseFieldTypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of value a custom field holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Free-form text. Also the `field_type` column default; draft
    /// validation never falls back to it.
    #[default]
    Text,
    /// Numeric value.
    Number,
    /// Calendar date (`YYYY-MM-DD`).
    Date,
    /// Boolean flag.
    Checkbox,
    /// Exactly one value picked from the field's options.
    Dropdown,
    /// Any subset of the field's options.
    MultiDropdown,
}

impl FieldType {
    /// Every known field type, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Text,
        Self::Number,
        Self::Date,
        Self::Checkbox,
        Self::Dropdown,
        Self::MultiDropdown,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Dropdown => "dropdown",
            Self::MultiDropdown => "multi_dropdown",
        }
    }

    /// Returns `true` when values are picked from caller-supplied options.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Dropdown | Self::MultiDropdown)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for FieldType {
    type Error = ParseFieldTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|field_type| field_type.as_str() == value)
            .ok_or_else(|| ParseFieldTypeError(value.to_owned()))
    }
}
