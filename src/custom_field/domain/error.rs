//! Error types for custom field domain values.

use thiserror::Error;

/// Errors returned while constructing a single custom field domain value.
///
/// Draft validation collects [`super::FieldViolation`]s instead; these
/// errors cover direct construction and reconstruction from storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CustomFieldDomainError {
    /// The field name is empty after trimming.
    #[error("custom field name must not be empty")]
    EmptyName,

    /// The internal name is empty.
    #[error("custom field internal name must not be empty")]
    EmptyInternalName,

    /// A choice field type was given no options.
    #[error("field type '{0}' requires at least one option")]
    MissingOptions(String),

    /// A non-choice field type was given options.
    #[error("field type '{0}' does not accept options")]
    UnexpectedOptions(String),
}

/// Error returned while parsing a field type tag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown field type: {0}")]
pub struct ParseFieldTypeError(pub String);
