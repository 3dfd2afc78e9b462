//! Key-value storage backends for session data
//!
//! These traits enable dependency injection and testing by abstracting the
//! client-persistent store the session lives in.

use std::collections::HashMap;

use parking_lot::Mutex;
use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not be reached (permission denied, not available, etc.)
    #[error("Storage access failed: {0}")]
    AccessFailed(String),

    /// Stored data could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Synchronous string key-value store
///
/// Reads return `Ok(None)` for missing keys; removing a missing key succeeds.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Errors
    /// Returns error if the backend cannot be read
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns error if the backend cannot be written
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` (idempotent)
    ///
    /// # Errors
    /// Returns error if the backend cannot be written
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage; the session ends with the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no keys are stored
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
