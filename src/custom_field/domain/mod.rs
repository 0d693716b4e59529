//! Domain model for user custom fields.
//!
//! A custom field is a user-defined attribute attached to a user record.
//! The domain owns internal-name derivation, the closed set of field types,
//! and the coupling between choice types and their options. Storage
//! concerns stay outside this boundary.

mod custom_field;
mod draft;
mod error;
mod field_type;
mod ids;
mod name;
mod options;
mod values;
mod violation;

pub use custom_field::{PersistedCustomFieldData, UserCustomField};
pub use draft::{CustomFieldDraft, ValidatedCustomField};
pub use error::{CustomFieldDomainError, ParseFieldTypeError};
pub use field_type::FieldType;
pub use ids::{CustomFieldId, UserId};
pub use name::{FieldName, InternalName, normalize};
pub use options::{FieldOptions, RawOptions};
pub use values::{CustomFieldValues, FieldValueError, FieldValueErrors};
pub use violation::{FieldAttribute, FieldViolation, ValidationErrors, ViolationKind};
