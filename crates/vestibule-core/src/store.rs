//! Persistent key-value storage for verification records.
//!
//! The store is the client-local persistence analog: string values under
//! role-specific keys, surviving restarts but carrying no durability or
//! cross-device guarantees. The gated user can always clear it; that only
//! re-locks the gate for them.
//!
//! Storage failures never escape a gate check. Callers log the error and
//! treat the role as not verified (fail closed, never fail open).

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::PathBuf;
use std::sync::RwLock;

use thiserror::Error;

/// Errors from record storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage medium could not be read or written.
    #[error("storage unavailable: {0}")]
    Io(#[from] io::Error),

    /// The storage contents are not well-formed.
    #[error("storage corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Internal lock poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,
}

/// Key-value storage for verification records.
pub trait RecordStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the medium cannot be written.
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store. Records do not survive the process; useful for tests
/// and for embedding the gate where persistence is handled elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: a single JSON object mapping keys to values.
///
/// Reads tolerate a missing file (empty store). Writes go through a
/// temporary file and a rename so a crash mid-write leaves the previous
/// contents intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the JSON file at `path`. The file and its
    /// parent directory are created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(Into::into),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(error) => Err(error.into()),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }
}
