//! In-process key-value store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::store::{KeyValueStore, Reservation, StoreResult};

/// A store backed by a `HashMap` behind an async read-write lock.
///
/// Intended for development, single-instance deployments and tests. State is
/// lost when the process exits.
///
/// `reserve` takes the write lock once for the whole check-claim-link
/// sequence, so reservations on this store are fully atomic.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory store");
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// All stored keys, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn reserve(&self, code: &str, url: &str, reverse_key: &str) -> StoreResult<Reservation> {
        let mut entries = self.entries.write().await;

        if let Some(winner) = entries.get(reverse_key) {
            return Ok(Reservation::Superseded(winner.clone()));
        }
        if entries.contains_key(code) {
            return Ok(Reservation::CodeTaken);
        }

        entries.insert(code.to_string(), url.to_string());
        entries.insert(reverse_key.to_string(), code.to_string());
        Ok(Reservation::Claimed)
    }
}
