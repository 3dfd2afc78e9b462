//! Storage doubles for tests
//!
//! Enabled for this crate's own tests and, through the `test-utils`
//! feature, for downstream test suites.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::auth::{KeyValueStorage, MemoryStorage, StorageError};

/// Backend whose every operation fails, simulating an unavailable keychain
#[derive(Debug, Default)]
pub struct FailingStorage {
    attempts: AtomicUsize,
}

impl FailingStorage {
    /// Backend failing every operation
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations attempted against this backend
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn fail<T>(&self, op: &str) -> Result<T, StorageError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::AccessFailed(format!("storage unavailable during {op}")))
    }
}

impl KeyValueStorage for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        self.fail("get")
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        self.fail("set")
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        self.fail("remove")
    }
}

/// Memory backend whose `remove` fails for one key
#[derive(Debug)]
pub struct KeyFailingStorage {
    inner: MemoryStorage,
    failing_key: String,
    remove_attempts: AtomicUsize,
}

impl KeyFailingStorage {
    /// Backend rejecting removal of `failing_key`
    pub fn new(failing_key: impl Into<String>) -> Self {
        Self {
            inner: MemoryStorage::new(),
            failing_key: failing_key.into(),
            remove_attempts: AtomicUsize::new(0),
        }
    }

    /// Number of `remove` calls observed, failed ones included
    pub fn remove_attempts(&self) -> usize {
        self.remove_attempts.load(Ordering::SeqCst)
    }
}

impl KeyValueStorage for KeyFailingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.remove_attempts.fetch_add(1, Ordering::SeqCst);
        if key == self.failing_key {
            return Err(StorageError::AccessFailed(format!("cannot remove {key}")));
        }
        self.inner.remove(key)
    }
}

/// Memory backend that counts writes, for asserting a store was touched
#[derive(Debug, Default)]
pub struct RecordingStorage {
    inner: MemoryStorage,
    writes: AtomicUsize,
}

impl RecordingStorage {
    /// Empty recording backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` and `remove` calls observed
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStorage for RecordingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(key)
    }
}
