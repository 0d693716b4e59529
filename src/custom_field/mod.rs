//! User-defined custom fields.
//!
//! A custom field is a named, typed attribute a user attaches to their
//! record. The module follows hexagonal architecture:
//!
//! - Domain types and draft validation in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
