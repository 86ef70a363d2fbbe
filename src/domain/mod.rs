//! Domain layer: the store contract and the allocation policy.
//!
//! Nothing in here knows about Redis, HTTP or configuration sources.
//!
//! - [`store`] - [`KeyValueStore`] trait and the reservation protocol
//! - [`policy`] - [`AllocationPolicy`] escalation ladder

pub mod policy;
pub mod store;

pub use policy::{AllocationPolicy, PolicyError, Rung};
pub use store::{KeyValueStore, Reservation, StoreError, StoreResult, reserve_with_primitives};

#[cfg(test)]
pub use store::MockKeyValueStore;
