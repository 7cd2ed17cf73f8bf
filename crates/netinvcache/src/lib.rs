//! # netinvcache
//!
//! Bounded two-way lookup cache in front of a network address inventory store.
//!
//! ## Architecture
//! - **Address table**: address -> inventory ID, `NONE` is never stored
//! - **Inventory table**: inventory ID -> record, empty records are never stored
//! - **Eviction**: LRU per table, 5000 entries by default, no expiry
//! - **Store handle**: resolved lazily from the `storage` module, once
//!
//! Lookups never fail. Store errors are logged through `tracing` and
//! surface as `NONE` or `None`.

#![warn(missing_docs)]

mod bounded;
mod cache;
mod config;
mod lru;
mod stats;

pub use bounded::BoundedCache;
pub use cache::NetworkAddressInventoryCache;
pub use config::{CacheConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_CAPACITY};
pub use stats::CacheStats;
