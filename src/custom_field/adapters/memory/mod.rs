//! In-memory adapter for custom field persistence.

mod repository;

pub use repository::InMemoryCustomFieldRepository;
