//! In-memory repository for custom field tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::custom_field::{
    domain::{CustomFieldId, FieldName, UserCustomField, UserId},
    ports::{CustomFieldRepository, CustomFieldRepositoryError, CustomFieldRepositoryResult},
};

/// Thread-safe in-memory custom field repository.
///
/// The name index is updated under the same write lock as the records, so
/// the uniqueness check and the write are atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomFieldRepository {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    fields: HashMap<CustomFieldId, UserCustomField>,
    name_index: HashMap<FieldName, CustomFieldId>,
}

impl InMemoryCustomFieldRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error<T>(err: &PoisonError<T>) -> CustomFieldRepositoryError {
    CustomFieldRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn oldest_first(fields: &mut [UserCustomField]) {
    fields.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.name().as_str().cmp(b.name().as_str()))
    });
}

#[async_trait]
impl CustomFieldRepository for InMemoryCustomFieldRepository {
    async fn insert(&self, field: &UserCustomField) -> CustomFieldRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;

        if state.fields.contains_key(&field.id()) {
            return Err(CustomFieldRepositoryError::DuplicateField(field.id()));
        }

        if state.name_index.contains_key(field.name()) {
            return Err(CustomFieldRepositoryError::DuplicateName(
                field.name().clone(),
            ));
        }

        state.name_index.insert(field.name().clone(), field.id());
        state.fields.insert(field.id(), field.clone());
        Ok(())
    }

    async fn update(&self, field: &UserCustomField) -> CustomFieldRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;

        let old_name = state
            .fields
            .get(&field.id())
            .ok_or(CustomFieldRepositoryError::NotFound(field.id()))?
            .name()
            .clone();

        if *field.name() != old_name {
            if let Some(&indexed_id) = state.name_index.get(field.name())
                && indexed_id != field.id()
            {
                return Err(CustomFieldRepositoryError::DuplicateName(
                    field.name().clone(),
                ));
            }
            state.name_index.remove(&old_name);
            state.name_index.insert(field.name().clone(), field.id());
        }

        state.fields.insert(field.id(), field.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: CustomFieldId,
    ) -> CustomFieldRepositoryResult<Option<UserCustomField>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.fields.get(&id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &FieldName,
    ) -> CustomFieldRepositoryResult<Option<UserCustomField>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state
            .name_index
            .get(name)
            .and_then(|id| state.fields.get(id))
            .cloned())
    }

    async fn exists_by_name(
        &self,
        name: &FieldName,
        excluding: Option<CustomFieldId>,
    ) -> CustomFieldRepositoryResult<bool> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state
            .name_index
            .get(name)
            .is_some_and(|id| Some(*id) != excluding))
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> CustomFieldRepositoryResult<Vec<UserCustomField>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        let mut owned: Vec<UserCustomField> = state
            .fields
            .values()
            .filter(|field| field.user_id() == user_id)
            .cloned()
            .collect();
        oldest_first(&mut owned);
        Ok(owned)
    }

    async fn delete(&self, id: CustomFieldId) -> CustomFieldRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let removed = state
            .fields
            .remove(&id)
            .ok_or(CustomFieldRepositoryError::NotFound(id))?;
        state.name_index.remove(removed.name());
        Ok(())
    }

    async fn delete_for_user(&self, user_id: UserId) -> CustomFieldRepositoryResult<usize> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let doomed: Vec<(CustomFieldId, FieldName)> = state
            .fields
            .values()
            .filter(|field| field.user_id() == user_id)
            .map(|field| (field.id(), field.name().clone()))
            .collect();
        for (id, name) in &doomed {
            state.fields.remove(id);
            state.name_index.remove(name);
        }
        Ok(doomed.len())
    }
}
