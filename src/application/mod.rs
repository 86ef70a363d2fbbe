//! Application layer: orchestrates the store, generator and policy into the
//! shorten and resolve use cases.
//!
//! - [`services`] - [`services::CodeAllocator`]

pub mod services;
