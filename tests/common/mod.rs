#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Barrier;

use kv_shortener::application::services::CodeAllocator;
use kv_shortener::domain::{
    AllocationPolicy, KeyValueStore, Reservation, StoreError, StoreResult, reserve_with_primitives,
};
use kv_shortener::infrastructure::store::MemoryStore;
use kv_shortener::state::AppState;
use kv_shortener::utils::code_generator::CodeGenerator;

/// Generator replaying a fixed list of codes, then falling back to `zz` + counter.
pub struct SequenceGenerator {
    codes: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl SequenceGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CodeGenerator for SequenceGenerator {
    fn generate(&self, length: usize) -> String {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| format!("{:0>width$}", n, width = length))
    }
}

pub fn allocator_with(
    store: Arc<dyn KeyValueStore>,
    generator: Arc<dyn CodeGenerator>,
) -> Arc<CodeAllocator> {
    Arc::new(CodeAllocator::new(
        store,
        generator,
        AllocationPolicy::default(),
    ))
}

pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let allocator = Arc::new(CodeAllocator::with_random_codes(
        store.clone(),
        AllocationPolicy::default(),
    ));
    (AppState::new(allocator), store)
}

/// Store exposing only the four primitives, so `reserve` runs the default
/// two-step protocol.
pub struct PrimitiveStore {
    pub inner: MemoryStore,
}

#[async_trait]
impl KeyValueStore for PrimitiveStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.inner.set(key, value).await
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        self.inner.set_if_absent(key, value).await
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.inner.delete(key).await
    }
}

/// Holds the first `gated` reverse-key lookups until all of them have arrived,
/// forcing concurrent shortens to observe the same initial miss.
pub struct GatedStore {
    pub inner: MemoryStore,
    atomic_reserve: bool,
    gated: usize,
    seen: AtomicUsize,
    barrier: Barrier,
}

impl GatedStore {
    pub fn new(gated: usize, atomic_reserve: bool) -> Self {
        Self {
            inner: MemoryStore::new(),
            atomic_reserve,
            gated,
            seen: AtomicUsize::new(0),
            barrier: Barrier::new(gated),
        }
    }
}

#[async_trait]
impl KeyValueStore for GatedStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self.inner.get(key).await?;
        if key.starts_with("url:") && self.seen.fetch_add(1, Ordering::SeqCst) < self.gated {
            self.barrier.wait().await;
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.inner.set(key, value).await
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        self.inner.set_if_absent(key, value).await
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.inner.delete(key).await
    }

    async fn reserve(&self, code: &str, url: &str, reverse_key: &str) -> StoreResult<Reservation> {
        if self.atomic_reserve {
            self.inner.reserve(code, url, reverse_key).await
        } else {
            reserve_with_primitives(self, code, url, reverse_key).await
        }
    }
}

/// Store whose every operation fails as if the backend were down.
pub struct DownStore;

#[async_trait]
impl KeyValueStore for DownStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn set_if_absent(&self, _key: &str, _value: &str) -> StoreResult<bool> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}
