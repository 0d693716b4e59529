//! Diesel schema for custom field persistence.

diesel::table! {
    /// User-defined custom field definitions.
    user_custom_fields (id) {
        /// Custom field identifier.
        id -> Uuid,
        /// Owning user (`users.id`); rows are removed when the user is deleted.
        user_id -> Uuid,
        /// Globally unique display name; no length limit.
        name -> Varchar,
        /// Internal name derived from the display name.
        internal_name -> Varchar,
        /// Field type tag (defaults to `text` at the column level).
        #[max_length = 32]
        field_type -> Varchar,
        /// Dropdown options as a JSONB array of strings.
        options -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

