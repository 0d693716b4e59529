//! Application services for custom field definitions.

mod registry;

pub use registry::{
    CustomFieldChanges, CustomFieldService, CustomFieldServiceError, CustomFieldServiceResult,
};
