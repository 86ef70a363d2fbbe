//! Key-value store backends.
//!
//! Provides two [`KeyValueStore`] implementations:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`MemoryStore`] - In-process store for development and tests

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::{Config, StoreBackend};
use crate::domain::store::KeyValueStore;

/// Builds the store selected by the configuration.
///
/// # Errors
///
/// Returns an error if the Redis backend is selected and no connection can
/// be established.
pub async fn connect(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    match config.store_backend {
        StoreBackend::Redis => {
            let store = RedisStore::connect(&config.redis_url, config.redis_connect_retries)
                .await
                .context("Failed to initialise Redis store")?;
            tracing::info!("Store backend: Redis");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Store backend: in-memory (mappings are lost on restart)");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
