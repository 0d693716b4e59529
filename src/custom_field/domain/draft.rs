//! Unvalidated custom field input and its collect-all validation.

use super::{
    FieldAttribute, FieldName, FieldOptions, FieldType, InternalName, RawOptions, UserId,
    ValidationErrors, ViolationKind,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-supplied custom field attributes, before validation.
///
/// Every attribute is optional so that missing input is reported as a
/// violation rather than rejected by the type system. `options` is kept as
/// raw JSON so that malformed shapes can be reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldDraft {
    /// Owning user.
    pub user_id: Option<UserId>,
    /// Display name.
    pub name: Option<String>,
    /// Field type tag, e.g. `"dropdown"`.
    pub field_type: Option<String>,
    /// Dropdown options; expected to be an array of strings.
    pub options: Option<Value>,
}

impl CustomFieldDraft {
    /// Creates a draft with the three required attributes and no options.
    #[must_use]
    pub fn new(user_id: UserId, name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            name: Some(name.into()),
            field_type: Some(field_type.into()),
            options: None,
        }
    }

    /// Sets the options to a list of strings.
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(Value::Array(
            options
                .into_iter()
                .map(|option| Value::String(option.into()))
                .collect(),
        ));
        self
    }

    /// Sets the options to an arbitrary JSON value.
    #[must_use]
    pub fn with_raw_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }

    /// Returns the name to check for uniqueness, when one was supplied.
    #[must_use]
    pub fn candidate_name(&self) -> Option<FieldName> {
        self.name
            .as_deref()
            .and_then(|name| FieldName::new(name).ok())
    }

    /// Validates the draft and derives the internal name.
    ///
    /// Every violated constraint is collected; nothing short-circuits.
    /// Name uniqueness needs storage and is checked by the service.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each violated constraint.
    pub fn validate(&self) -> Result<ValidatedCustomField, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.user_id.is_none() {
            errors.push(FieldAttribute::User, ViolationKind::MissingField);
        }

        let name = self.candidate_name();
        if name.is_none() {
            errors.push(FieldAttribute::Name, ViolationKind::MissingField);
            errors.push(FieldAttribute::InternalName, ViolationKind::MissingField);
        }

        let field_type = self.parse_field_type(&mut errors);
        let options = field_type.and_then(|kind| self.check_options(kind, &mut errors));

        match (self.user_id, name, field_type, options) {
            (Some(user_id), Some(valid_name), Some(kind), Some(valid_options))
                if errors.is_empty() =>
            {
                Ok(ValidatedCustomField {
                    user_id,
                    internal_name: InternalName::derive(&valid_name),
                    name: valid_name,
                    field_type: kind,
                    options: valid_options,
                })
            }
            _ => Err(errors),
        }
    }

    fn parse_field_type(&self, errors: &mut ValidationErrors) -> Option<FieldType> {
        let Some(tag) = self.field_type.as_deref() else {
            errors.push(FieldAttribute::FieldType, ViolationKind::MissingField);
            return None;
        };
        if tag.trim().is_empty() {
            errors.push(FieldAttribute::FieldType, ViolationKind::MissingField);
            return None;
        }
        match FieldType::try_from(tag) {
            Ok(kind) => Some(kind),
            Err(_) => {
                errors.push(
                    FieldAttribute::FieldType,
                    ViolationKind::InvalidEnum {
                        value: tag.to_owned(),
                    },
                );
                None
            }
        }
    }

    fn check_options(
        &self,
        field_type: FieldType,
        errors: &mut ValidationErrors,
    ) -> Option<FieldOptions> {
        let raw = RawOptions::classify(self.options.as_ref());
        let violation = match (field_type.is_choice(), raw) {
            (true, RawOptions::List(values)) => {
                return FieldOptions::for_type(field_type, values).ok();
            }
            (false, RawOptions::Blank) => return Some(FieldOptions::none()),
            (true, RawOptions::Blank) => ViolationKind::OptionsRequired,
            (true, RawOptions::Malformed) => ViolationKind::OptionsMalformed,
            (false, RawOptions::List(_) | RawOptions::Malformed) => {
                ViolationKind::OptionsForbidden
            }
        };
        errors.push(FieldAttribute::Options, violation);
        None
    }
}

/// Attributes that passed draft validation, with the derived internal name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCustomField {
    user_id: UserId,
    name: FieldName,
    internal_name: InternalName,
    field_type: FieldType,
    options: FieldOptions,
}

impl ValidatedCustomField {
    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &FieldName {
        &self.name
    }

    /// Returns the derived internal name.
    #[must_use]
    pub const fn internal_name(&self) -> &InternalName {
        &self.internal_name
    }

    /// Returns the field type.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the options.
    #[must_use]
    pub const fn options(&self) -> &FieldOptions {
        &self.options
    }

    pub(super) fn into_parts(
        self,
    ) -> (UserId, FieldName, InternalName, FieldType, FieldOptions) {
        (
            self.user_id,
            self.name,
            self.internal_name,
            self.field_type,
            self.options,
        )
    }
}
