//! Key-value store contract consumed by the code allocator.

use async_trait::async_trait;

/// Errors raised by a key-value store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or rejected the command.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with something the caller cannot interpret.
    #[error("Unexpected store reply: {0}")]
    UnexpectedReply(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of an attempt to reserve a candidate code for a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reservation {
    /// The forward key was created and this call owns the reverse mapping.
    Claimed,

    /// The candidate code already maps to some URL. Nothing was written.
    CodeTaken,

    /// Another request registered the URL first. Holds the winning code.
    ///
    /// Any forward key written by this call has already been removed.
    Superseded(String),
}

/// Abstract key-value store holding forward (`code -> url`) and reverse
/// (`url:<fingerprint> -> code`) entries.
///
/// Any backend offering the four primitives is substitutable. `set_if_absent`
/// must be atomic on the backend side: it is the only mutual-exclusion
/// primitive the allocator relies on.
///
/// # Reservation paths
///
/// [`KeyValueStore::reserve`] has a default implementation built from the
/// primitives alone (see [`reserve_with_primitives`]). Backends with
/// server-side transactions should override it so the whole
/// reserve-and-reconcile sequence runs as one atomic step.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis, atomic path via Lua script
/// - [`crate::infrastructure::store::MemoryStore`] - in-process map, atomic path via write lock
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Unconditionally writes `value` under `key`.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Writes `value` under `key` only if the key does not exist.
    ///
    /// Returns `true` if this call created the key.
    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Reserves `code` for `url` and links `reverse_key` to it.
    async fn reserve(&self, code: &str, url: &str, reverse_key: &str) -> StoreResult<Reservation> {
        reserve_with_primitives(self, code, url, reverse_key).await
    }

    /// Reports whether the backend is reachable.
    async fn health_check(&self) -> bool {
        true
    }
}

/// Reservation built from `set_if_absent`, `get` and `delete` only.
///
/// 1. Claim the forward key; if it exists the candidate collided.
/// 2. Claim the reverse key. Success means this request is the winner.
/// 3. Otherwise read the winner and delete the forward key claimed in step 1.
///
/// The reverse key is never overwritten, so concurrent callers converge on a
/// single reverse mapping and at most one surviving forward code.
pub async fn reserve_with_primitives<S>(
    store: &S,
    code: &str,
    url: &str,
    reverse_key: &str,
) -> StoreResult<Reservation>
where
    S: KeyValueStore + ?Sized,
{
    if !store.set_if_absent(code, url).await? {
        return Ok(Reservation::CodeTaken);
    }

    if store.set_if_absent(reverse_key, code).await? {
        return Ok(Reservation::Claimed);
    }

    match store.get(reverse_key).await? {
        Some(winner) => {
            store.delete(code).await?;
            Ok(Reservation::Superseded(winner))
        }
        // Reverse keys are never deleted, so this only happens if the
        // backend lost the key between the two calls.
        None => {
            store.set(reverse_key, code).await?;
            Ok(Reservation::Claimed)
        }
    }
}
