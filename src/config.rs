//! Configuration Module
//!
//! Handles loading and managing store configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::store::DEFAULT_TTL;

/// Store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the file the default backend persists to
    pub storage_path: PathBuf,
    /// Default TTL in milliseconds applied to writes without an explicit TTL
    pub default_ttl_ms: u64,
    /// Optional byte quota for the backing store (unlimited when unset)
    pub max_store_bytes: Option<usize>,
}

/// Default TTL applied when none is configured, in milliseconds.
const DEFAULT_TTL_MS: u64 = DEFAULT_TTL.as_millis() as u64;

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORAGE_PATH` - File the default backend persists to (default: ttl_store.json)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 86400000, 24 hours)
    /// - `MAX_STORE_BYTES` - Byte quota for the backing store (default: unlimited)
    pub fn from_env() -> Self {
        Self {
            storage_path: env::var("STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("ttl_store.json")),
            default_ttl_ms: env::var("DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_MS),
            max_store_bytes: env::var("MAX_STORE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("ttl_store.json"),
            default_ttl_ms: DEFAULT_TTL_MS,
            max_store_bytes: None,
        }
    }
}
