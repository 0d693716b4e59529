//! `PostgreSQL` adapter for custom field persistence.
//!
//! The schema is created by the SQL files under `migrations/`. Name
//! uniqueness is enforced by the `idx_user_custom_fields_name` unique index
//! and ownership by a cascading foreign key to `users`.

mod config;
mod models;
mod repository;
mod schema;

pub use config::{
    CONNECT_TIMEOUT_VAR, DATABASE_URL_VAR, POOL_SIZE_VAR, PgPoolConfig, PoolConfigError,
};
pub use repository::{CustomFieldPgPool, PostgresCustomFieldRepository};
