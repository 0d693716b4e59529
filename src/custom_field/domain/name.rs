//! Display name and derived internal name types.

use super::CustomFieldDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable custom field label.
///
/// Names are stored exactly as entered. Uniqueness is compared on this
/// exact value, so `"Age"` and `"age"` are distinct names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Creates a field name.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldDomainError::EmptyName`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, CustomFieldDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(CustomFieldDomainError::EmptyName);
        }
        Ok(Self(raw))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Machine-safe identifier derived from a [`FieldName`].
///
/// The value is the lower-cased name with every run of whitespace replaced
/// by a single underscore. It is never set independently of the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InternalName(String);

impl InternalName {
    /// Derives the internal name for a display name.
    #[must_use]
    pub fn derive(name: &FieldName) -> Self {
        Self(normalize(name.as_str()))
    }

    /// Restores an internal name read back from storage.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldDomainError::EmptyInternalName`] when the value
    /// is empty.
    pub fn from_persisted(value: impl Into<String>) -> Result<Self, CustomFieldDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(CustomFieldDomainError::EmptyInternalName);
        }
        Ok(Self(raw))
    }

    /// Returns the internal name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for InternalName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for InternalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-cases `value` and collapses each whitespace run into one `_`.
///
/// `normalize("some test name")` yields `"some_test_name"`.
#[must_use]
pub fn normalize(value: &str) -> String {
    let mut normalized = String::with_capacity(value.len());
    let mut in_whitespace = false;
    for ch in value.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                normalized.push('_');
            }
            in_whitespace = true;
        } else {
            normalized.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }
    normalized
}
