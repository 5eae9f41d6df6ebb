//! Store Entry Module
//!
//! Defines the wire record a store writes to its backend: the caller's
//! value wrapped with an optional expiry timestamp.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// == Entry ==
/// A single stored record with value and expiry metadata.
///
/// The serialized shape is the persistence contract: a JSON object with a
/// `value` field holding the caller's value exactly as serde renders it,
/// and an optional `expiry` field in Unix milliseconds. `expiry` is
/// omitted entirely for records that never expire, and unknown extra
/// fields are ignored when decoding, so records written by newer versions
/// still read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    /// The stored value
    pub value: T,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<u64>,
}

impl<T> Entry<T> {
    // == Constructor ==
    /// Creates a new entry with an optional expiry timestamp.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `expiry` - Optional expiration timestamp in Unix milliseconds
    pub fn new(value: T, expiry: Option<u64>) -> Self {
        Self { value, expiry }
    }

    // == Is Expired ==
    /// Checks whether the entry is stale at the given instant.
    ///
    /// Boundary condition: an entry is expired when the current time is
    /// greater than or equal to its expiry time, so a record becomes
    /// stale the moment its TTL has fully elapsed. Entries without an
    /// expiry never expire.
    ///
    /// # Arguments
    /// * `now_ms` - The current time in Unix milliseconds
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.expiry {
            Some(expiry) => now_ms >= expiry,
            None => false,
        }
    }
}

impl<T: Serialize> Entry<T> {
    // == Encode ==
    /// Serializes the entry to its JSON wire form.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<T: DeserializeOwned> Entry<T> {
    // == Decode ==
    /// Parses an entry from its JSON wire form.
    ///
    /// Fails when the record is not a JSON object with a `value` field
    /// decodable as `T`; callers treat such records as corrupt.
    pub fn decode(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
