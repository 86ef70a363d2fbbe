//! Short code generation.
//!
//! Candidates are drawn uniformly from a 62-symbol alphanumeric alphabet.
//! Generators never touch storage; uniqueness is enforced by the store's
//! reservation step.

use rand::Rng;

/// Symbols a generated code may contain.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Source of candidate short codes.
///
/// The production implementation is [`AlphanumericGenerator`]. Tests inject
/// deterministic sequences to drive the collision and escalation paths.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a candidate code exactly `length` symbols long.
    fn generate(&self, length: usize) -> String;
}

/// Uniform random generator over [`ALPHABET`] backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlphanumericGenerator;

impl AlphanumericGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for AlphanumericGenerator {
    fn generate(&self, length: usize) -> String {
        let mut rng = rand::rng();

        (0..length)
            .map(|_| {
                let idx = rng.random_range(0..ALPHABET.len());
                ALPHABET[idx] as char
            })
            .collect()
    }
}
