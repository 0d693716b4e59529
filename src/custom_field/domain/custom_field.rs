//! User custom field aggregate root.

use super::{
    CustomFieldDraft, CustomFieldId, FieldName, FieldOptions, FieldType, InternalName, UserId,
    ValidatedCustomField,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A user-defined custom field attached to a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCustomField {
    id: CustomFieldId,
    user_id: UserId,
    name: FieldName,
    internal_name: InternalName,
    field_type: FieldType,
    options: FieldOptions,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted custom field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCustomFieldData {
    /// Persisted identifier.
    pub id: CustomFieldId,
    /// Persisted owner.
    pub user_id: UserId,
    /// Persisted display name.
    pub name: FieldName,
    /// Persisted internal name.
    pub internal_name: InternalName,
    /// Persisted field type.
    pub field_type: FieldType,
    /// Persisted options.
    pub options: FieldOptions,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserCustomField {
    /// Creates a new custom field from validated attributes.
    #[must_use]
    pub fn new(validated: ValidatedCustomField, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let (user_id, name, internal_name, field_type, options) = validated.into_parts();
        Self {
            id: CustomFieldId::new(),
            user_id,
            name,
            internal_name,
            field_type,
            options,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a custom field from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCustomFieldData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            name: data.name,
            internal_name: data.internal_name,
            field_type: data.field_type,
            options: data.options,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the custom field identifier.
    #[must_use]
    pub const fn id(&self) -> CustomFieldId {
        self.id
    }

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

    /// Returns the internal name derived from the display name.
    #[must_use]
    pub const fn internal_name(&self) -> &InternalName {
        &self.internal_name
    }

    /// Returns the field type.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the options; empty unless the type is a choice type.
    #[must_use]
    pub const fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Rebuilds a draft holding the current attributes.
    #[must_use]
    pub fn to_draft(&self) -> CustomFieldDraft {
        let draft = CustomFieldDraft::new(
            self.user_id,
            self.name.as_str(),
            self.field_type.as_str(),
        );
        if self.options.is_empty() {
            draft
        } else {
            draft.with_options(self.options.as_slice().iter().cloned())
        }
    }

    /// Replaces the editable attributes with re-validated ones.
    ///
    /// The owner never changes; the internal name follows the new name.
    pub fn apply(&mut self, validated: ValidatedCustomField, clock: &impl Clock) {
        let (_, name, internal_name, field_type, options) = validated.into_parts();
        self.name = name;
        self.internal_name = internal_name;
        self.field_type = field_type;
        self.options = options;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
