//! Shared test helpers for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, TemporaryDatabase, postgres_cluster};
use super::cluster::ManagedCluster;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use mockable::DefaultClock;
use std::io;
use tokio::runtime::Runtime;
use user_fields::custom_field::{
    adapters::postgres::{PgPoolConfig, PostgresCustomFieldRepository},
    domain::{CustomFieldDraft, UserCustomField, UserId},
};
use uuid::Uuid;

/// SQL creating the owning `users` table.
pub const CREATE_USERS_SQL: &str =
    include_str!("../../migrations/2024-01-18-000000_create_users/up.sql");

/// SQL creating the `user_custom_fields` table and its indexes.
pub const CREATE_CUSTOM_FIELDS_SQL: &str =
    include_str!("../../migrations/2024-01-18-182059_create_user_custom_fields/up.sql");

/// Builds a current-thread runtime for driving async repository calls.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
pub fn test_runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Database, repository, and runtime prepared for a single test.
///
/// Field order matters: the repository pool closes before the database is
/// dropped.
pub struct PreparedRepo {
    /// Repository under test.
    pub repo: PostgresCustomFieldRepository,
    /// Runtime driving repository futures.
    pub rt: Runtime,
    /// Migrated temporary database.
    pub db: TemporaryDatabase,
}

impl PreparedRepo {
    /// Inserts an owner row and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or insert fails.
    pub fn insert_user(&self) -> Result<UserId, BoxError> {
        let user_id = UserId::new();
        let mut conn = PgConnection::establish(&self.db.url())?;
        diesel::sql_query("INSERT INTO users (id) VALUES ($1)")
            .bind::<diesel::sql_types::Uuid, _>(user_id.into_inner())
            .execute(&mut conn)?;
        Ok(user_id)
    }

    /// Deletes an owner row, letting the foreign key cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or delete fails.
    pub fn delete_user(&self, user_id: UserId) -> Result<(), BoxError> {
        let mut conn = PgConnection::establish(&self.db.url())?;
        diesel::sql_query("DELETE FROM users WHERE id = $1")
            .bind::<diesel::sql_types::Uuid, _>(user_id.into_inner())
            .execute(&mut conn)?;
        Ok(())
    }

    /// Runs raw SQL against the test database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or statement fails.
    pub fn execute_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut conn = PgConnection::establish(&self.db.url())?;
        conn.batch_execute(sql)?;
        Ok(())
    }
}

/// Creates a migrated database and a repository connected to it.
///
/// # Errors
///
/// Returns an error if database creation, migration, or pool setup fails.
pub fn prepare_repo(cluster: &'static ManagedCluster) -> Result<PreparedRepo, BoxError> {
    let db = cluster.temporary_database(&format!("test_{}", Uuid::new_v4().simple()))?;
    apply_migrations(&db.url())?;

    let pool = PgPoolConfig::new(db.url()).with_max_size(2).build_pool()?;
    Ok(PreparedRepo {
        repo: PostgresCustomFieldRepository::new(pool),
        rt: test_runtime()?,
        db,
    })
}

fn apply_migrations(url: &str) -> Result<(), BoxError> {
    let mut conn = PgConnection::establish(url)?;
    conn.batch_execute(CREATE_USERS_SQL)?;
    conn.batch_execute(CREATE_CUSTOM_FIELDS_SQL)?;
    Ok(())
}

/// Builds a validated custom field without persisting it.
///
/// # Panics
///
/// Panics when the draft is invalid.
pub fn custom_field(
    user_id: UserId,
    name: &str,
    field_type: &str,
    options: &[&str],
) -> UserCustomField {
    let validated = CustomFieldDraft::new(user_id, name, field_type)
        .with_options(options.iter().copied())
        .validate()
        .expect("test draft should be valid");
    UserCustomField::new(validated, &DefaultClock)
}
