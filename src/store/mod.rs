//! Store Module
//!
//! Provides the expiring key-value store and the typed per-key handle
//! built on top of it.

use std::time::Duration;

mod cell;
mod entry;
mod lookup;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use cell::CachedValue;
pub use entry::Entry;
pub use lookup::Lookup;
pub use stats::StoreStats;
pub use store::TtlStore;

// == Public Constants ==
/// TTL applied when the caller does not choose one: 24 hours
pub const DEFAULT_TTL: Duration = Duration::from_millis(24 * 60 * 60 * 1000);
