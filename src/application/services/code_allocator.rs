//! Short code allocation and resolution.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::{AllocationPolicy, KeyValueStore, Reservation, StoreError};
use crate::utils::code_generator::{AlphanumericGenerator, CodeGenerator};
use crate::utils::fingerprint;

/// Errors returned by [`CodeAllocator`].
#[derive(Debug, thiserror::Error)]
pub enum AllocatorError {
    #[error("URL must not be empty")]
    EmptyUrl,

    #[error("Short code '{code}' not found")]
    NotFound { code: String },

    #[error("No free short code after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Allocates short codes for URLs and resolves them back.
///
/// The allocator keeps no state between calls. All coordination between
/// concurrent requests, including requests served by other processes, goes
/// through the store's reservation step, so one instance can be shared by
/// every request handler.
///
/// # Deduplication
///
/// Each URL is identified by the SHA-256 fingerprint of its trimmed form. The
/// reverse mapping `url:<fingerprint> -> code` is the single source of truth
/// for "the" code of a URL: the first writer wins and losers adopt its code.
///
/// # Collisions
///
/// Candidates are reserved with a set-if-absent on the forward key. On
/// collision a new candidate is drawn; once a rung of the
/// [`AllocationPolicy`] is used up the allocator moves to the next, longer
/// rung. Existing keys are never overwritten: if the whole ladder collides
/// the call fails with [`AllocatorError::AllocationExhausted`].
pub struct CodeAllocator {
    store: Arc<dyn KeyValueStore>,
    generator: Arc<dyn CodeGenerator>,
    policy: AllocationPolicy,
}

impl CodeAllocator {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        generator: Arc<dyn CodeGenerator>,
        policy: AllocationPolicy,
    ) -> Self {
        Self {
            store,
            generator,
            policy,
        }
    }

    /// Creates an allocator drawing random alphanumeric codes.
    pub fn with_random_codes(store: Arc<dyn KeyValueStore>, policy: AllocationPolicy) -> Self {
        Self::new(store, Arc::new(AlphanumericGenerator::new()), policy)
    }

    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }

    /// Returns the short code for `url`, allocating one if needed.
    ///
    /// Shortening the same URL again (after trimming) returns the same code.
    ///
    /// # Errors
    ///
    /// - [`AllocatorError::EmptyUrl`] if `url` is blank
    /// - [`AllocatorError::AllocationExhausted`] if every candidate collided
    /// - [`AllocatorError::Store`] if the store cannot be reached
    pub async fn shorten(&self, url: &str) -> Result<String, AllocatorError> {
        let normalized = fingerprint::normalize(url);
        if normalized.is_empty() {
            return Err(AllocatorError::EmptyUrl);
        }

        let reverse_key = fingerprint::reverse_key(normalized);

        if let Some(existing) = self.store.get(&reverse_key).await? {
            debug!(code = %existing, "URL already shortened");
            return Ok(existing);
        }

        let mut attempts = 0;
        let rungs = self.policy.rungs();

        for (index, rung) in rungs.iter().enumerate() {
            for _ in 0..rung.attempts {
                attempts += 1;
                let candidate = self.generator.generate(rung.length);

                match self
                    .store
                    .reserve(&candidate, normalized, &reverse_key)
                    .await?
                {
                    Reservation::Claimed => {
                        info!(code = %candidate, length = rung.length, attempts, "Allocated short code");
                        return Ok(candidate);
                    }
                    Reservation::Superseded(winner) => {
                        warn!(
                            discarded = %candidate,
                            code = %winner,
                            "Concurrent request registered URL first"
                        );
                        return Ok(winner);
                    }
                    Reservation::CodeTaken => {
                        debug!(code = %candidate, length = rung.length, attempts, "Short code collision");
                    }
                }
            }

            if let Some(next) = rungs.get(index + 1) {
                warn!(
                    from = rung.length,
                    to = next.length,
                    "Escalating short code length after repeated collisions"
                );
            }
        }

        error!(attempts, "Short code allocation exhausted");
        Err(AllocatorError::AllocationExhausted { attempts })
    }

    /// Returns the URL stored for `code`.
    ///
    /// # Errors
    ///
    /// - [`AllocatorError::NotFound`] if the code is unknown. Codes that could
    ///   address a reverse mapping are treated as unknown.
    /// - [`AllocatorError::Store`] if the store cannot be reached
    pub async fn resolve(&self, code: &str) -> Result<String, AllocatorError> {
        if code.is_empty() || code.contains(':') {
            return Err(AllocatorError::NotFound {
                code: code.to_string(),
            });
        }

        self.store
            .get(code)
            .await?
            .ok_or_else(|| AllocatorError::NotFound {
                code: code.to_string(),
            })
    }
}
