//! Backend Module
//!
//! The backing-store contract and the bundled implementations.
//!
//! A backend is a synchronous, string-keyed, string-valued persistent map
//! scoped to a single namespace. It knows nothing about expiry or value
//! types (the store layer owns those) and offers no transactional
//! multi-key operations.

mod file;
mod memory;

// Re-export public types
pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::BackendError;

// == Backend Trait ==
/// A host-supplied persistent key-value medium.
///
/// Implementations must be strictly synchronous; every store operation
/// performs at most one round trip through this trait.
pub trait Backend {
    /// Returns the raw record stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Stores `raw` under `key`, overwriting any prior record.
    fn set(&self, key: &str, raw: &str) -> Result<(), BackendError>;

    /// Removes the record under `key`.
    ///
    /// Removing an absent key is a no-op, not an error.
    fn remove(&self, key: &str) -> Result<(), BackendError>;
}
