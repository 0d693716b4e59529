//! Adapter implementations for the custom field repository port.

pub mod memory;
pub mod postgres;
