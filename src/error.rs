//! Error types for the expiring store
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Backend Error Enum ==
/// Failures raised by a backing store implementation.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Underlying I/O failure while touching the storage medium
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// The write would exceed the backend's configured byte quota
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// The backing medium cannot serve requests
    #[error("backing store unavailable: {0}")]
    Unavailable(String),
}

// == Store Error Enum ==
/// Unified error type for the typed store layer.
///
/// Undecodable records are deliberately not represented here: a read that
/// finds garbage reports it through `Lookup::Corrupt` rather than failing,
/// so only writes and backend trouble can surface as errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A value could not be serialized into a storable record
    #[error("failed to encode record for key '{key}': {source}")]
    Encode {
        /// Key the record was meant to be stored under
        key: String,
        /// Serializer failure
        source: serde_json::Error,
    },

    /// The backing store rejected or could not serve an operation
    #[error(transparent)]
    Backend(#[from] BackendError),
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
