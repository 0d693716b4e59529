//! Port contracts for custom field persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the custom field
//! service.

pub mod repository;

pub use repository::{
    CustomFieldRepository, CustomFieldRepositoryError, CustomFieldRepositoryResult,
};
