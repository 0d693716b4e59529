//! Unit tests for the custom field module.
