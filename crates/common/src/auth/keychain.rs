//! Platform keychain storage backend
//!
//! Persists the session across restarts in macOS Keychain Access, Windows
//! Credential Manager, or the Linux Secret Service.

use keyring::Entry;
use tracing::debug;

use super::storage::{KeyValueStorage, StorageError};

/// Keychain-backed [`KeyValueStorage`]; one keychain entry per key
pub struct KeychainStorage {
    service_name: String,
}

impl KeychainStorage {
    /// Create a backend scoped to `service_name` (e.g. "ApplyMate.session")
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    /// Keychain service the tokens are filed under
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn entry(&self, key: &str) -> Result<Entry, StorageError> {
        Entry::new(&self.service_name, key).map_err(|e| {
            StorageError::AccessFailed(format!("Failed to open keychain entry {key}: {e}"))
        })
    }
}

impl KeyValueStorage for KeychainStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        debug!(service = %self.service_name, key = %key, "Reading keychain entry");

        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => {
                Err(StorageError::AccessFailed(format!("Failed to read {key} from keychain: {e}")))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!(service = %self.service_name, key = %key, "Writing keychain entry");

        self.entry(key)?.set_password(value).map_err(|e| {
            StorageError::AccessFailed(format!("Failed to store {key} in keychain: {e}"))
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        debug!(service = %self.service_name, key = %key, "Deleting keychain entry");

        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::AccessFailed(format!(
                "Failed to delete {key} from keychain: {e}"
            ))),
        }
    }
}

impl std::fmt::Debug for KeychainStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeychainStorage").field("service_name", &self.service_name).finish()
    }
}
