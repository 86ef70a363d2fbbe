//! Infrastructure layer for external integrations.
//!
//! Implements the [`crate::domain::KeyValueStore`] contract on concrete
//! backends.
//!
//! # Modules
//!
//! - [`store`] - Redis and in-memory store implementations

pub mod store;
