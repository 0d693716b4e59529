//! Collected validation failures for custom field drafts.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Attribute of a custom field that a violation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldAttribute {
    /// The owning user reference.
    User,
    /// The display name.
    Name,
    /// The derived internal name.
    InternalName,
    /// The field type tag.
    FieldType,
    /// The dropdown options.
    Options,
}

impl FieldAttribute {
    /// Returns the attribute name as used in messages and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Name => "name",
            Self::InternalName => "internal_name",
            Self::FieldType => "field_type",
            Self::Options => "options",
        }
    }
}

impl fmt::Display for FieldAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of constraint a draft violated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required attribute is absent or blank.
    MissingField,
    /// The value is not one of the allowed tags.
    InvalidEnum {
        /// The rejected value.
        value: String,
    },
    /// A choice field type was given no options.
    OptionsRequired,
    /// A non-choice field type was given options.
    OptionsForbidden,
    /// Options were supplied but are not a list of strings.
    OptionsMalformed,
    /// Another custom field already uses this name.
    DuplicateName,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField | Self::OptionsRequired => f.write_str("can't be blank"),
            Self::InvalidEnum { .. } => f.write_str("is not included in the list"),
            Self::OptionsForbidden => f.write_str("must be blank"),
            Self::OptionsMalformed => f.write_str("is invalid"),
            Self::DuplicateName => f.write_str("has already been taken"),
        }
    }
}

/// A single violated constraint, tagged with the attribute it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    attribute: FieldAttribute,
    kind: ViolationKind,
}

impl FieldViolation {
    /// Creates a violation.
    #[must_use]
    pub const fn new(attribute: FieldAttribute, kind: ViolationKind) -> Self {
        Self { attribute, kind }
    }

    /// Returns the attribute the violation concerns.
    #[must_use]
    pub const fn attribute(&self) -> FieldAttribute {
        self.attribute
    }

    /// Returns the violated constraint.
    #[must_use]
    pub const fn kind(&self) -> &ViolationKind {
        &self.kind
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.attribute, self.kind)
    }
}

/// Every constraint a draft violated, in detection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("custom field is invalid: {}", join_messages(.0))]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a collection holding one violation.
    #[must_use]
    pub fn single(attribute: FieldAttribute, kind: ViolationKind) -> Self {
        Self(vec![FieldViolation::new(attribute, kind)])
    }

    /// Records a violation.
    pub fn push(&mut self, attribute: FieldAttribute, kind: ViolationKind) {
        self.0.push(FieldViolation::new(attribute, kind));
    }

    /// Returns `true` when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of recorded violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the recorded violations.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldViolation> {
        self.0.iter()
    }

    /// Returns `true` when `attribute` has a violation of `kind`.
    #[must_use]
    pub fn contains(&self, attribute: FieldAttribute, kind: &ViolationKind) -> bool {
        self.0
            .iter()
            .any(|violation| violation.attribute == attribute && violation.kind == *kind)
    }

    /// Returns the violations recorded for `attribute`.
    #[must_use]
    pub fn for_attribute(&self, attribute: FieldAttribute) -> Vec<&ViolationKind> {
        self.0
            .iter()
            .filter(|violation| violation.attribute == attribute)
            .map(FieldViolation::kind)
            .collect()
    }

    /// Returns one message per violation, e.g. `options can't be blank`.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldViolation;
    type IntoIter = std::slice::Iter<'a, FieldViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn join_messages(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
