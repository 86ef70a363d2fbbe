//! Helpers used by the allocator:
//!
//! - [`code_generator`] - Random short code generation
//! - [`fingerprint`] - URL normalization and reverse-key derivation

pub mod code_generator;
pub mod fingerprint;
