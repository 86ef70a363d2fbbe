//! # kv-shortener
//!
//! A URL shortening service that allocates short codes on top of a
//! key-value store.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Store contract and escalation policy
//! - **Application Layer** ([`application`]) - The code allocator
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores
//! - **API Layer** ([`api`]) - Handlers, DTOs and middleware
//!
//! ## How codes are allocated
//!
//! Every URL is trimmed and fingerprinted with SHA-256. The store holds a
//! forward entry `code -> url` and a reverse entry `url:<fingerprint> -> code`.
//! Shortening a URL that already has a reverse entry returns the existing
//! code. Otherwise random alphanumeric candidates are reserved with an atomic
//! set-if-absent, escalating to longer codes as collisions persist. Concurrent
//! requests for the same URL converge on a single code.
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! cargo run
//!
//! curl -X POST localhost:3000/shorten -H 'content-type: application/json' \
//!      -d '{"url": "https://example.com/a/long/path"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AllocatorError, CodeAllocator};
    pub use crate::domain::{AllocationPolicy, KeyValueStore, Reservation, Rung, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{MemoryStore, RedisStore};
    pub use crate::state::AppState;
    pub use crate::utils::code_generator::{AlphanumericGenerator, CodeGenerator};
}
