//! Ttl Store Module
//!
//! Main store engine combining a persistent backend with per-record TTL
//! expiration. Expiry is enforced lazily on the read path; nothing sweeps
//! the backend in the background, so a record that is never read again
//! stays on disk until a read notices it is stale.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::{Backend, FileBackend};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::store::entry::Entry;
use crate::store::lookup::Lookup;
use crate::store::stats::{StatsCounters, StoreStats};
use crate::store::DEFAULT_TTL;

// == Ttl Store ==
/// Expiring key-value store over a pluggable backend.
///
/// Values are serde-serializable and stored as JSON records tagged with
/// an absolute expiry timestamp. The store itself is stateless apart from
/// its counters; cloning it yields another handle onto the same backend,
/// clock, and statistics.
#[derive(Clone)]
pub struct TtlStore {
    /// Persistent record storage
    backend: Arc<dyn Backend + Send + Sync>,
    /// Time source for expiry decisions
    clock: Arc<dyn Clock + Send + Sync>,
    /// TTL applied by `insert`
    default_ttl: Duration,
    /// Read-path outcome counters
    stats: Arc<StatsCounters>,
}

impl TtlStore {
    // == Constructors ==
    /// Creates a store over `backend` with the standard 24 hour TTL.
    ///
    /// # Arguments
    /// * `backend` - The persistent medium records are written to
    pub fn new(backend: Arc<dyn Backend + Send + Sync>) -> Self {
        Self::with_default_ttl(backend, DEFAULT_TTL)
    }

    /// Creates a store over `backend` with a caller-chosen default TTL.
    ///
    /// # Arguments
    /// * `backend` - The persistent medium records are written to
    /// * `default_ttl` - TTL applied by [`TtlStore::insert`]
    pub fn with_default_ttl(
        backend: Arc<dyn Backend + Send + Sync>,
        default_ttl: Duration,
    ) -> Self {
        Self::with_clock(backend, default_ttl, Arc::new(SystemClock))
    }

    /// Creates a store with an explicit time source.
    ///
    /// Production code uses the system clock; tests inject a
    /// [`ManualClock`](crate::clock::ManualClock) to step through expiry
    /// deterministically.
    pub fn with_clock(
        backend: Arc<dyn Backend + Send + Sync>,
        default_ttl: Duration,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            backend,
            clock,
            default_ttl,
            stats: Arc::new(StatsCounters::default()),
        }
    }

    /// Creates a store over a [`FileBackend`] described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend: Arc<dyn Backend + Send + Sync> = match config.max_store_bytes {
            Some(max) => Arc::new(FileBackend::open_with_quota(&config.storage_path, max)?),
            None => Arc::new(FileBackend::open(&config.storage_path)?),
        };

        Ok(Self::with_default_ttl(
            backend,
            Duration::from_millis(config.default_ttl_ms),
        ))
    }

    // == Lookup ==
    /// Reads the record under `key` and reports exactly what was found.
    ///
    /// A stale record is evicted from the backend before this returns, so
    /// expiry observed here is also expiry enforced. A record that fails
    /// to decode is reported as [`Lookup::Corrupt`] but left in place;
    /// only expiry removes data.
    ///
    /// # Returns
    /// * `Err` only when the backend itself cannot be read
    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Result<Lookup<T>> {
        let raw = match self.backend.get(key)? {
            Some(raw) => raw,
            None => {
                self.stats.record_miss();
                return Ok(Lookup::Missing);
            }
        };

        let entry: Entry<T> = match Entry::decode(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                self.stats.record_decode_failure();
                warn!(key, error = %err, "Stored record is not decodable");
                return Ok(Lookup::Corrupt);
            }
        };

        if entry.is_expired_at(self.clock.now_ms()) {
            self.stats.record_expiration();
            self.evict_expired(key, entry.expiry);
            return Ok(Lookup::Expired);
        }

        self.stats.record_hit();
        Ok(Lookup::Fresh(entry.value))
    }

    // == Get ==
    /// Retrieves a fresh value by key, or `None`.
    ///
    /// Collapses every non-fresh outcome, including a backend read
    /// failure, to `None`. Callers that need to distinguish the cases use
    /// [`TtlStore::lookup`].
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.lookup(key) {
            Ok(lookup) => lookup.into_option(),
            Err(err) => {
                warn!(key, error = %err, "Lookup failed, treating record as absent");
                None
            }
        }
    }

    // == Insert ==
    /// Stores `value` under `key` with the store's default TTL.
    ///
    /// An existing record under the key is overwritten and its expiry
    /// reset, whatever its previous state.
    pub fn insert<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.insert_with_ttl(key, value, self.default_ttl)
    }

    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `key` - The key to store under
    /// * `value` - The value to store
    /// * `ttl` - Time until the record becomes stale
    pub fn insert_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<()> {
        let expiry = self.clock.now_ms().saturating_add(ttl.as_millis() as u64);
        self.write_entry(key, value, Some(expiry))
    }

    /// Stores `value` under `key` with no expiry at all.
    pub fn insert_never_expiring<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.write_entry(key, value, None)
    }

    fn write_entry<T: Serialize>(&self, key: &str, value: &T, expiry: Option<u64>) -> Result<()> {
        let entry = Entry::new(value, expiry);
        let raw = entry.encode().map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;

        self.backend.set(key, &raw)?;
        Ok(())
    }

    // == Remove ==
    /// Removes the record under `key`.
    ///
    /// Removing an absent key succeeds and changes nothing.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.backend.remove(key)?;
        Ok(())
    }

    // == Stats ==
    /// Returns a snapshot of the read-path counters.
    pub fn stats(&self) -> StoreStats {
        self.stats.snapshot()
    }

    /// Returns the TTL applied by [`TtlStore::insert`].
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // Eviction is best effort: the record already failed its expiry
    // check, so a backend that refuses the remove only delays the
    // physical cleanup until the next read.
    fn evict_expired(&self, key: &str, expiry: Option<u64>) {
        let expired_at = expiry
            .and_then(|ms| Utc.timestamp_millis_opt(ms as i64).single())
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string());
        debug!(key, expired_at = %expired_at, "Evicting expired record");

        if let Err(err) = self.backend.remove(key) {
            warn!(key, error = %err, "Failed to evict expired record");
        }
    }
}
