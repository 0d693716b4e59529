//! User fields: user-defined custom field definitions.
//!
//! This crate validates, normalises, and persists the custom fields a user
//! attaches to their record. Each field derives a machine-safe internal name
//! from its display name and couples dropdown types to their options.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure validation and derivation with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`custom_field`]: Custom field definitions, validation, and storage

pub mod custom_field;
