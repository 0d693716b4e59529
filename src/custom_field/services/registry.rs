//! Service layer for custom field definitions.
//!
//! Provides [`CustomFieldService`], which validates drafts, enforces global
//! name uniqueness at the storage boundary, and persists custom fields.

use crate::custom_field::{
    domain::{
        CustomFieldDraft, CustomFieldId, CustomFieldValues, FieldAttribute, FieldName,
        FieldValueErrors, UserCustomField, UserId, ValidatedCustomField, ValidationErrors,
        ViolationKind,
    },
    ports::{CustomFieldRepository, CustomFieldRepositoryError},
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Edits applied to an existing custom field.
///
/// `None` keeps the stored value. To clear options, pass an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFieldChanges {
    name: Option<String>,
    field_type: Option<String>,
    options: Option<Value>,
}

impl CustomFieldChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the field; the internal name is re-derived.
    #[must_use]
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Changes the field type.
    #[must_use]
    pub fn with_field_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    /// Replaces the options with a list of strings.
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

    /// Replaces the options with an arbitrary JSON value.
    #[must_use]
    pub fn with_raw_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }

    fn overlay(self, mut draft: CustomFieldDraft) -> CustomFieldDraft {
        if let Some(name) = self.name {
            draft.name = Some(name);
        }
        if let Some(field_type) = self.field_type {
            draft.field_type = Some(field_type);
        }
        if let Some(options) = self.options {
            draft.options = Some(options);
        }
        draft
    }
}

/// Service-level errors for custom field operations.
#[derive(Debug, Error)]
pub enum CustomFieldServiceError {
    /// The draft violated one or more constraints, including name
    /// uniqueness detected by storage.
    #[error(transparent)]
    Validation(ValidationErrors),
    /// Submitted values do not match their custom field definitions.
    #[error(transparent)]
    Values(#[from] FieldValueErrors),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(CustomFieldRepositoryError),
}

impl CustomFieldServiceError {
    /// Returns the validation errors, when this is a validation failure.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for CustomFieldServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<CustomFieldRepositoryError> for CustomFieldServiceError {
    fn from(err: CustomFieldRepositoryError) -> Self {
        match err {
            CustomFieldRepositoryError::DuplicateName(_) => Self::Validation(
                ValidationErrors::single(FieldAttribute::Name, ViolationKind::DuplicateName),
            ),
            other => Self::Repository(other),
        }
    }
}

/// Result type for custom field service operations.
pub type CustomFieldServiceResult<T> = Result<T, CustomFieldServiceError>;

/// Custom field orchestration service.
#[derive(Clone)]
pub struct CustomFieldService<R, C>
where
    R: CustomFieldRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> CustomFieldService<R, C>
where
    R: CustomFieldRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new custom field service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Validates a draft and persists it as a new custom field.
    ///
    /// All violations are reported together. Nothing is written unless the
    /// draft is valid and its name is unused.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldServiceError::Validation`] listing every
    /// violated constraint (a storage-level name collision is reported as
    /// [`ViolationKind::DuplicateName`]), or
    /// [`CustomFieldServiceError::Repository`] when persistence fails.
    pub async fn create(
        &self,
        draft: CustomFieldDraft,
    ) -> CustomFieldServiceResult<UserCustomField> {
        let validated = self.validate_with_uniqueness(&draft, None).await?;
        let field = UserCustomField::new(validated, &*self.clock);

        if let Err(err) = self.repository.insert(&field).await {
            if matches!(err, CustomFieldRepositoryError::DuplicateName(_)) {
                tracing::warn!(name = %field.name(), "name claimed concurrently; insert rejected");
            }
            return Err(err.into());
        }

        tracing::info!(
            id = %field.id(),
            user_id = %field.user_id(),
            internal_name = %field.internal_name(),
            field_type = %field.field_type(),
            "custom field created"
        );
        Ok(field)
    }

    /// Applies `changes` to an existing custom field.
    ///
    /// The merged attributes are validated as a whole, the internal name is
    /// re-derived, and uniqueness ignores the field itself.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldServiceError::Repository`] wrapping
    /// [`CustomFieldRepositoryError::NotFound`] for an unknown ID, or the
    /// same errors as [`CustomFieldService::create`].
    pub async fn update(
        &self,
        id: CustomFieldId,
        changes: CustomFieldChanges,
    ) -> CustomFieldServiceResult<UserCustomField> {
        let mut field = self.find_by_id_or_error(id).await?;
        let draft = changes.overlay(field.to_draft());
        let validated = self.validate_with_uniqueness(&draft, Some(id)).await?;

        field.apply(validated, &*self.clock);
        self.repository.update(&field).await?;

        tracing::info!(
            id = %field.id(),
            internal_name = %field.internal_name(),
            field_type = %field.field_type(),
            "custom field updated"
        );
        Ok(field)
    }

    /// Finds a custom field by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(
        &self,
        id: CustomFieldId,
    ) -> CustomFieldServiceResult<Option<UserCustomField>> {
        tracing::debug!(%id, "looking up custom field");
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Finds a custom field by its exact name.
    ///
    /// Returns `Ok(None)` for a blank name.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldServiceError::Repository`] when lookup fails.
    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> CustomFieldServiceResult<Option<UserCustomField>> {
        let Ok(field_name) = FieldName::new(name) else {
            return Ok(None);
        };
        tracing::debug!(name = %field_name, "looking up custom field by name");
        Ok(self.repository.find_by_name(&field_name).await?)
    }

    /// Returns the custom fields owned by `user_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldServiceError::Repository`] when lookup fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> CustomFieldServiceResult<Vec<UserCustomField>> {
        Ok(self.repository.list_for_user(user_id).await?)
    }

    /// Deletes a custom field.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldServiceError::Repository`] when the field does
    /// not exist or persistence fails.
    pub async fn delete(&self, id: CustomFieldId) -> CustomFieldServiceResult<()> {
        self.repository.delete(id).await?;
        tracing::info!(%id, "custom field deleted");
        Ok(())
    }

    /// Deletes every custom field owned by `user_id`.
    ///
    /// Mirrors the cascade applied when the owning user row is removed.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldServiceError::Repository`] when persistence fails.
    pub async fn delete_for_user(&self, user_id: UserId) -> CustomFieldServiceResult<usize> {
        let removed = self.repository.delete_for_user(user_id).await?;
        tracing::info!(%user_id, removed, "custom fields deleted for user");
        Ok(removed)
    }

    /// Checks a user's values against that user's custom field definitions.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldServiceError::Values`] describing each rejected
    /// value, or [`CustomFieldServiceError::Repository`] when lookup fails.
    pub async fn validate_values(
        &self,
        user_id: UserId,
        values: &CustomFieldValues,
    ) -> CustomFieldServiceResult<()> {
        let fields = self.repository.list_for_user(user_id).await?;
        values.validate(&fields).map_err(|errors| {
            tracing::warn!(%user_id, rejected = errors.len(), "custom field values rejected");
            CustomFieldServiceError::from(errors)
        })
    }

    async fn validate_with_uniqueness(
        &self,
        draft: &CustomFieldDraft,
        excluding: Option<CustomFieldId>,
    ) -> CustomFieldServiceResult<ValidatedCustomField> {
        let outcome = draft.validate();

        let name_taken = match draft.candidate_name() {
            Some(name) => self.repository.exists_by_name(&name, excluding).await?,
            None => false,
        };

        let result = match (outcome, name_taken) {
            (Ok(validated), false) => Ok(validated),
            (Ok(_), true) => Err(ValidationErrors::single(
                FieldAttribute::Name,
                ViolationKind::DuplicateName,
            )),
            (Err(mut errors), taken) => {
                if taken {
                    errors.push(FieldAttribute::Name, ViolationKind::DuplicateName);
                }
                Err(errors)
            }
        };

        result.map_err(|errors| {
            tracing::warn!(
                violations = errors.len(),
                reason = %errors,
                "custom field draft rejected"
            );
            CustomFieldServiceError::Validation(errors)
        })
    }

    async fn find_by_id_or_error(
        &self,
        id: CustomFieldId,
    ) -> CustomFieldServiceResult<UserCustomField> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CustomFieldRepositoryError::NotFound(id).into())
    }
}
