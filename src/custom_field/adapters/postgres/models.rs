//! Diesel row models for custom field persistence.

use super::schema::user_custom_fields;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for custom field records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_custom_fields)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomFieldRow {
    /// Custom field identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Derived internal name.
    pub internal_name: String,
    /// Field type tag.
    pub field_type: String,
    /// Options JSON array.
    pub options: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for custom field records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_custom_fields)]
pub struct NewCustomFieldRow {
    /// Custom field identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Derived internal name.
    pub internal_name: String,
    /// Field type tag.
    pub field_type: String,
    /// Options JSON array.
    pub options: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when a custom field is edited.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = user_custom_fields)]
pub struct CustomFieldChangeset {
    /// Display name.
    pub name: String,
    /// Derived internal name.
    pub internal_name: String,
    /// Field type tag.
    pub field_type: String,
    /// Options JSON array.
    pub options: Value,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
