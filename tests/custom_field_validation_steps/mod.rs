//! Step definitions for custom field validation scenarios.
