//! File Backend Module
//!
//! Durable backing store: one JSON file holding every record, the closest
//! file-system analog of a browser's local storage area. The full map is
//! read once when the backend opens and rewritten on every mutation.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::debug;

use crate::backend::Backend;
use crate::error::BackendError;

// == File Backend ==

/// A single-file JSON store with an optional size quota.
///
/// Reads are served from an in-memory mirror of the file. Mutations
/// serialize the whole map and replace the file through a rename, so a
/// crash mid-write never leaves a half-written store behind. The mirror
/// only advances once the file write succeeds; a failed persist leaves
/// both the file and the mirror on the previous state.
pub struct FileBackend {
    path: PathBuf,
    max_bytes: Option<usize>,
    map: RwLock<BTreeMap<String, String>>,
}

impl FileBackend {
    /// Opens the store at `path`, loading any existing records.
    ///
    /// A missing file yields an empty store; the file itself is created
    /// on the first write. A file that exists but cannot be parsed is
    /// rejected with [`BackendError::Unavailable`] rather than silently
    /// discarded.
    ///
    /// # Arguments
    /// * `path` - Location of the JSON storage file
    ///
    /// # Returns
    /// * `Result<Self, BackendError>` - The opened backend
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        Self::open_inner(path.as_ref().to_path_buf(), None)
    }

    /// Opens the store at `path` with a quota on the serialized file size.
    ///
    /// A mutation whose resulting file would exceed `max_bytes` is
    /// rejected with [`BackendError::QuotaExceeded`] and changes nothing.
    pub fn open_with_quota(
        path: impl AsRef<Path>,
        max_bytes: usize,
    ) -> Result<Self, BackendError> {
        Self::open_inner(path.as_ref().to_path_buf(), Some(max_bytes))
    }

    fn open_inner(path: PathBuf, max_bytes: Option<usize>) -> Result<Self, BackendError> {
        let map: BTreeMap<String, String> = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents).map_err(|err| {
                BackendError::Unavailable(format!(
                    "malformed storage file {}: {}",
                    path.display(),
                    err
                ))
            })?
        } else {
            BTreeMap::new()
        };

        debug!(
            path = %path.display(),
            records = map.len(),
            "Opened storage file"
        );

        Ok(Self {
            path,
            max_bytes,
            map: RwLock::new(map),
        })
    }

    /// Returns the location of the storage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of live records.
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    /// Returns true when the backend holds no records.
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    // Serializes `map` and replaces the storage file atomically. The
    // temporary sibling is renamed over the real path only after the
    // bytes are flushed to disk.
    fn persist(&self, map: &BTreeMap<String, String>) -> Result<(), BackendError> {
        let serialized = serde_json::to_string(map).map_err(|err| {
            BackendError::Unavailable(format!("storage map not serializable: {err}"))
        })?;

        if let Some(max) = self.max_bytes {
            if serialized.len() > max {
                return Err(BackendError::QuotaExceeded);
            }
        }

        let tmp = self.path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(serialized.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.map.read().get(key).cloned())
    }

    fn set(&self, key: &str, raw: &str) -> Result<(), BackendError> {
        let mut map = self.map.write();
        // Mutate a scratch copy; the mirror only advances on success.
        let mut next = map.clone();
        next.insert(key.to_string(), raw.to_string());
        self.persist(&next)?;
        *map = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        let mut map = self.map.write();
        if !map.contains_key(key) {
            return Ok(());
        }
        let mut next = map.clone();
        next.remove(key);
        self.persist(&next)?;
        *map = next;
        Ok(())
    }
}
