//! `PostgreSQL` repository implementation for custom fields.

use super::{
    models::{CustomFieldChangeset, CustomFieldRow, NewCustomFieldRow},
    schema::user_custom_fields,
};
use crate::custom_field::{
    domain::{
        CustomFieldId, FieldName, FieldOptions, FieldType, InternalName,
        PersistedCustomFieldData, UserCustomField, UserId,
    },
    ports::{CustomFieldRepository, CustomFieldRepositoryError, CustomFieldRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the custom field adapter.
pub type CustomFieldPgPool = Pool<ConnectionManager<PgConnection>>;

/// Unique index enforcing global name uniqueness.
const NAME_UNIQUE_INDEX: &str = "idx_user_custom_fields_name";

/// `PostgreSQL`-backed custom field repository.
#[derive(Debug, Clone)]
pub struct PostgresCustomFieldRepository {
    pool: CustomFieldPgPool,
}

impl PostgresCustomFieldRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CustomFieldPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CustomFieldRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CustomFieldRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(CustomFieldRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CustomFieldRepositoryError::persistence)?
    }
}

#[async_trait]
impl CustomFieldRepository for PostgresCustomFieldRepository {
    async fn insert(&self, field: &UserCustomField) -> CustomFieldRepositoryResult<()> {
        let field_id = field.id();
        let user_id = field.user_id();
        let field_name = field.name().clone();
        let new_row = to_new_row(field)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(user_custom_fields::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_name_unique_violation(info.as_ref()) =>
                    {
                        CustomFieldRepositoryError::DuplicateName(field_name.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CustomFieldRepositoryError::DuplicateField(field_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        CustomFieldRepositoryError::UnknownUser(user_id)
                    }
                    _ => CustomFieldRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, field: &UserCustomField) -> CustomFieldRepositoryResult<()> {
        let field_id = field.id();
        let field_name = field.name().clone();
        let changeset = CustomFieldChangeset {
            name: field.name().as_str().to_owned(),
            internal_name: field.internal_name().as_str().to_owned(),
            field_type: field.field_type().as_str().to_owned(),
            options: serde_json::to_value(field.options())
                .map_err(CustomFieldRepositoryError::persistence)?,
            updated_at: field.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                user_custom_fields::table.filter(user_custom_fields::id.eq(field_id.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                    if is_name_unique_violation(info.as_ref()) =>
                {
                    CustomFieldRepositoryError::DuplicateName(field_name.clone())
                }
                _ => CustomFieldRepositoryError::persistence(err),
            })?;

            if updated_count == 0 {
                return Err(CustomFieldRepositoryError::NotFound(field_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: CustomFieldId,
    ) -> CustomFieldRepositoryResult<Option<UserCustomField>> {
        self.run_blocking(move |connection| {
            let row = user_custom_fields::table
                .filter(user_custom_fields::id.eq(id.into_inner()))
                .select(CustomFieldRow::as_select())
                .first::<CustomFieldRow>(connection)
                .optional()
                .map_err(CustomFieldRepositoryError::persistence)?;
            row.map(row_to_custom_field).transpose()
        })
        .await
    }

    async fn find_by_name(
        &self,
        name: &FieldName,
    ) -> CustomFieldRepositoryResult<Option<UserCustomField>> {
        let name_str = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = user_custom_fields::table
                .filter(user_custom_fields::name.eq(&name_str))
                .select(CustomFieldRow::as_select())
                .first::<CustomFieldRow>(connection)
                .optional()
                .map_err(CustomFieldRepositoryError::persistence)?;
            row.map(row_to_custom_field).transpose()
        })
        .await
    }

    async fn exists_by_name(
        &self,
        name: &FieldName,
        excluding: Option<CustomFieldId>,
    ) -> CustomFieldRepositoryResult<bool> {
        let name_str = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let mut query = user_custom_fields::table
                .filter(user_custom_fields::name.eq(name_str))
                .into_boxed();
            if let Some(id) = excluding {
                query = query.filter(user_custom_fields::id.ne(id.into_inner()));
            }
            let matches: i64 = query
                .count()
                .get_result(connection)
                .map_err(CustomFieldRepositoryError::persistence)?;
            Ok(matches > 0)
        })
        .await
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> CustomFieldRepositoryResult<Vec<UserCustomField>> {
        self.run_blocking(move |connection| {
            let rows = user_custom_fields::table
                .filter(user_custom_fields::user_id.eq(user_id.into_inner()))
                .order_by((
                    user_custom_fields::created_at.asc(),
                    user_custom_fields::name.asc(),
                ))
                .select(CustomFieldRow::as_select())
                .load::<CustomFieldRow>(connection)
                .map_err(CustomFieldRepositoryError::persistence)?;
            rows.into_iter().map(row_to_custom_field).collect()
        })
        .await
    }

    async fn delete(&self, id: CustomFieldId) -> CustomFieldRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                user_custom_fields::table.filter(user_custom_fields::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(CustomFieldRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(CustomFieldRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_for_user(&self, user_id: UserId) -> CustomFieldRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(
                user_custom_fields::table
                    .filter(user_custom_fields::user_id.eq(user_id.into_inner())),
            )
            .execute(connection)
            .map_err(CustomFieldRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(field: &UserCustomField) -> CustomFieldRepositoryResult<NewCustomFieldRow> {
    let options =
        serde_json::to_value(field.options()).map_err(CustomFieldRepositoryError::persistence)?;

    Ok(NewCustomFieldRow {
        id: field.id().into_inner(),
        user_id: field.user_id().into_inner(),
        name: field.name().as_str().to_owned(),
        internal_name: field.internal_name().as_str().to_owned(),
        field_type: field.field_type().as_str().to_owned(),
        options,
        created_at: field.created_at(),
        updated_at: field.updated_at(),
    })
}

fn row_to_custom_field(row: CustomFieldRow) -> CustomFieldRepositoryResult<UserCustomField> {
    let CustomFieldRow {
        id,
        user_id,
        name,
        internal_name,
        field_type,
        options,
        created_at,
        updated_at,
    } = row;

    let parsed_name =
        FieldName::new(name).map_err(CustomFieldRepositoryError::invalid_persisted_data)?;
    let parsed_internal_name = InternalName::from_persisted(internal_name)
        .map_err(CustomFieldRepositoryError::invalid_persisted_data)?;
    let parsed_type = FieldType::try_from(field_type.as_str())
        .map_err(CustomFieldRepositoryError::invalid_persisted_data)?;
    let option_values: Vec<String> = serde_json::from_value(options)
        .map_err(CustomFieldRepositoryError::invalid_persisted_data)?;
    let parsed_options = FieldOptions::for_type(parsed_type, option_values)
        .map_err(CustomFieldRepositoryError::invalid_persisted_data)?;

    let data = PersistedCustomFieldData {
        id: CustomFieldId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        name: parsed_name,
        internal_name: parsed_internal_name,
        field_type: parsed_type,
        options: parsed_options,
        created_at,
        updated_at,
    };
    Ok(UserCustomField::from_persisted(data))
}

fn is_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == NAME_UNIQUE_INDEX)
}
