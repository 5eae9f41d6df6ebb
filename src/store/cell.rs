//! Cached Value Module
//!
//! A typed handle over a single key: reads the record once on creation
//! and keeps the live value in memory, writing through to the store on
//! every update.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::store::TtlStore;

// == Cached Value ==
/// One key, one in-memory value, write-through persistence.
///
/// The handle reads its key once when created: a fresh record seeds the
/// value, and anything else, whether missing, expired, corrupt, or an
/// unreadable backend, falls back to the caller's initial value. After
/// that, reads come from memory and every [`CachedValue::set`] writes
/// through to the store with the handle's TTL.
///
/// Persistence is best effort. A write the backend rejects keeps the new
/// value in memory and logs the failure; the handle never rolls back.
///
/// Handles do not coordinate. Two handles on the same key each hold
/// their own in-memory value and whichever writes last owns the stored
/// record. A single writer per key is the intended pattern.
pub struct CachedValue<T> {
    store: TtlStore,
    key: String,
    ttl: Duration,
    current: T,
}

impl<T: Serialize + DeserializeOwned> CachedValue<T> {
    // == Constructors ==
    /// Creates a handle over `key` using the store's default TTL.
    ///
    /// # Arguments
    /// * `store` - The store the key lives in
    /// * `key` - The key this handle owns
    /// * `initial` - Value used when no fresh record exists
    pub fn new(store: TtlStore, key: impl Into<String>, initial: T) -> Self {
        let ttl = store.default_ttl();
        Self::with_ttl(store, key, initial, ttl)
    }

    /// Creates a handle over `key` with its own TTL for writes.
    pub fn with_ttl(store: TtlStore, key: impl Into<String>, initial: T, ttl: Duration) -> Self {
        let key = key.into();
        let current = store.get(&key).unwrap_or(initial);

        Self {
            store,
            key,
            ttl,
            current,
        }
    }

    // == Get ==
    /// Returns the current value.
    ///
    /// Served from memory; the backend is not consulted again after the
    /// handle is created.
    pub fn get(&self) -> &T {
        &self.current
    }

    // == Set ==
    /// Replaces the current value and writes it through to the store.
    ///
    /// Memory is updated first, so the caller's view advances even when
    /// the backend refuses the write.
    pub fn set(&mut self, value: T) {
        self.current = value;

        if let Err(err) = self
            .store
            .insert_with_ttl(&self.key, &self.current, self.ttl)
        {
            warn!(key = %self.key, error = %err, "Failed to persist updated value");
        }
    }

    /// Returns the key this handle owns.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the TTL applied on every write.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
