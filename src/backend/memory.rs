//! Memory Backend Module
//!
//! In-process backing store. Records live in a `HashMap` and vanish with
//! the process, which makes this the backend of choice for tests and for
//! purely ephemeral caches.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::backend::Backend;
use crate::error::BackendError;

// == Memory Backend ==

/// A `HashMap`-backed store with an optional byte quota.
///
/// Quota accounting counts the key and value bytes of every live record,
/// the same measure a browser applies to its local storage area. A write
/// that would push usage past the quota is rejected and leaves the store
/// unchanged.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: RwLock<Inner>,
    max_bytes: Option<usize>,
}

#[derive(Debug, Default)]
struct Inner {
    map: HashMap<String, String>,
    used_bytes: usize,
}

impl MemoryBackend {
    /// Creates an unbounded in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory backend that rejects writes once the total
    /// key and value bytes would exceed `max_bytes`.
    pub fn with_quota(max_bytes: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            max_bytes: Some(max_bytes),
        }
    }

    /// Returns the number of live records.
    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    /// Returns true when the backend holds no records.
    pub fn is_empty(&self) -> bool {
        self.inner.read().map.is_empty()
    }

    /// Returns the current key plus value byte usage.
    pub fn used_bytes(&self) -> usize {
        self.inner.read().used_bytes
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.inner.read().map.get(key).cloned())
    }

    fn set(&self, key: &str, raw: &str) -> Result<(), BackendError> {
        let mut inner = self.inner.write();
        // A replaced record frees its old bytes before the new ones count.
        let freed = inner
            .map
            .get(key)
            .map(|old| key.len() + old.len())
            .unwrap_or(0);
        let projected = inner.used_bytes - freed + key.len() + raw.len();
        if let Some(max) = self.max_bytes {
            if projected > max {
                return Err(BackendError::QuotaExceeded);
            }
        }
        inner.map.insert(key.to_string(), raw.to_string());
        inner.used_bytes = projected;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        let mut inner = self.inner.write();
        if let Some(old) = inner.map.remove(key) {
            inner.used_bytes -= key.len() + old.len();
        }
        Ok(())
    }
}
