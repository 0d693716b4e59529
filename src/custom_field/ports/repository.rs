//! Repository port for custom field persistence.

use crate::custom_field::domain::{CustomFieldId, FieldName, UserCustomField, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for custom field repository operations.
pub type CustomFieldRepositoryResult<T> = Result<T, CustomFieldRepositoryError>;

/// Custom field persistence contract.
///
/// Implementations must enforce global name uniqueness atomically with the
/// write, so that concurrent inserts of one name cannot both succeed.
#[async_trait]
pub trait CustomFieldRepository: Send + Sync {
    /// Stores a new custom field.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldRepositoryError::DuplicateField`] when the ID
    /// already exists, [`CustomFieldRepositoryError::DuplicateName`] when the
    /// name is taken, or [`CustomFieldRepositoryError::UnknownUser`] when the
    /// owner does not exist.
    async fn insert(&self, field: &UserCustomField) -> CustomFieldRepositoryResult<()>;

    /// Persists changes to an existing custom field.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldRepositoryError::NotFound`] when the field does
    /// not exist or [`CustomFieldRepositoryError::DuplicateName`] when the
    /// new name belongs to another field.
    async fn update(&self, field: &UserCustomField) -> CustomFieldRepositoryResult<()>;

    /// Finds a custom field by identifier.
    async fn find_by_id(
        &self,
        id: CustomFieldId,
    ) -> CustomFieldRepositoryResult<Option<UserCustomField>>;

    /// Finds a custom field by its exact name.
    async fn find_by_name(
        &self,
        name: &FieldName,
    ) -> CustomFieldRepositoryResult<Option<UserCustomField>>;

    /// Returns `true` when a field other than `excluding` uses `name`.
    ///
    /// Comparison is exact and case-sensitive.
    async fn exists_by_name(
        &self,
        name: &FieldName,
        excluding: Option<CustomFieldId>,
    ) -> CustomFieldRepositoryResult<bool>;

    /// Returns the fields owned by `user_id`, oldest first.
    async fn list_for_user(&self, user_id: UserId)
    -> CustomFieldRepositoryResult<Vec<UserCustomField>>;

    /// Deletes a custom field.
    ///
    /// # Errors
    ///
    /// Returns [`CustomFieldRepositoryError::NotFound`] when the field does
    /// not exist.
    async fn delete(&self, id: CustomFieldId) -> CustomFieldRepositoryResult<()>;

    /// Deletes every field owned by `user_id`, returning how many were removed.
    async fn delete_for_user(&self, user_id: UserId) -> CustomFieldRepositoryResult<usize>;
}

/// Errors returned by custom field repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CustomFieldRepositoryError {
    /// A custom field with the same identifier already exists.
    #[error("duplicate custom field identifier: {0}")]
    DuplicateField(CustomFieldId),

    /// A custom field with the same name already exists.
    #[error("duplicate custom field name: {0}")]
    DuplicateName(FieldName),

    /// The owning user does not exist.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// The custom field was not found.
    #[error("custom field not found: {0}")]
    NotFound(CustomFieldId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CustomFieldRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
