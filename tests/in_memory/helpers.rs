//! Shared test helpers for in-memory repository integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use std::io;
use tokio::runtime::Runtime;
use user_fields::custom_field::{
    adapters::memory::InMemoryCustomFieldRepository,
    domain::{CustomFieldDraft, UserCustomField, UserId},
};

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repo() -> InMemoryCustomFieldRepository {
    InMemoryCustomFieldRepository::new()
}

/// Provides an owner for the fields under test.
#[fixture]
pub fn user_id() -> UserId {
    UserId::new()
}

/// Builds a validated custom field without persisting it.
///
/// # Panics
///
/// Panics when the draft is invalid.
pub fn custom_field(user_id: UserId, name: &str, field_type: &str, options: &[&str]) -> UserCustomField {
    let validated = CustomFieldDraft::new(user_id, name, field_type)
        .with_options(options.iter().copied())
        .validate()
        .expect("test draft should be valid");
    UserCustomField::new(validated, &DefaultClock)
}
