//! Ttl Store - A lightweight expiring key-value store
//!
//! Stores serde-serializable values in a pluggable backend, tagging each
//! record with an absolute expiry timestamp. Expiry is enforced lazily
//! when records are read; nothing sweeps the backend in the background.

pub mod backend;
pub mod clock;
pub mod config;
pub mod error;
pub mod store;

pub use config::Config;
pub use store::{CachedValue, Lookup, StoreStats, TtlStore, DEFAULT_TTL};
