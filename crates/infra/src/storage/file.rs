//! JSON file storage for session tokens
//!
//! Keeps all keys in one JSON object on disk. Writes go to a sibling temp
//! file that is then renamed over the original, so a crash never leaves a
//! half-written session behind.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use applymate_common::auth::{KeyValueStorage, StorageError};
use parking_lot::Mutex;

/// File-backed [`KeyValueStorage`]
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Use `path` as the session file; it is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    /// Location of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StorageError::AccessFailed(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            StorageError::Serialization(format!("Corrupt session file {}: {e}", self.path.display()))
        })
    }

    /// Entries to modify; a corrupt file is replaced rather than blocking writes
    ///
    /// The flag is true when the file was corrupt and must be rewritten.
    fn load_for_write(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
        match self.load() {
            Ok(entries) => Ok((entries, false)),
            Err(StorageError::Serialization(reason)) => {
                tracing::warn!(reason = %reason, "Discarding corrupt session file");
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::AccessFailed(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let temp = self.path.with_extension("tmp");
        match fs::remove_file(&temp) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                return Err(StorageError::AccessFailed(format!(
                    "Failed to remove stale {}: {e}",
                    temp.display()
                )))
            }
            _ => {}
        }

        let write_failed = |e: std::io::Error| {
            StorageError::AccessFailed(format!("Failed to write {}: {e}", temp.display()))
        };
        let mut file = create_owner_only(&temp).map_err(write_failed)?;
        file.write_all(contents.as_bytes()).map_err(write_failed)?;
        file.sync_all().map_err(write_failed)?;
        drop(file);

        fs::rename(&temp, &self.path).map_err(|e| {
            StorageError::AccessFailed(format!("Failed to replace {}: {e}", self.path.display()))
        })?;

        tracing::debug!(path = %self.path.display(), keys = entries.len(), "Session file written");
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock();
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let (mut entries, _) = self.load_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let (mut entries, recovered) = self.load_for_write()?;
        if entries.remove(key).is_none() && !recovered {
            return Ok(());
        }
        self.save(&entries)
    }
}

/// Session files hold bearer tokens; they are created owner-only.
#[cfg(unix)]
fn create_owner_only(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new().write(true).create_new(true).mode(0o600).open(path)
}

#[cfg(not(unix))]
fn create_owner_only(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use applymate_common::auth::TokenStore;
    use applymate_domain::TokenPair;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn session_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = TokenStore::new(Arc::new(FileStorage::new(&path)));
        store.set_tokens(&TokenPair::new("A1", "R1")).unwrap();

        let reopened = TokenStore::new(Arc::new(FileStorage::new(&path)));
        assert_eq!(reopened.access(), "A1");
        assert_eq!(reopened.refresh(), "R1");

        reopened.clear().unwrap();
        reopened.clear().unwrap();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.json"));

        assert_eq!(storage.get("applymate_token").unwrap(), None);
        storage.remove("applymate_token").unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get("applymate_token"), Err(StorageError::Serialization(_))));

        let store = TokenStore::new(Arc::new(FileStorage::new(&path)));
        assert_eq!(store.access(), "");
    }

    #[test]
    fn corrupt_file_does_not_block_logout_or_login() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = TokenStore::new(Arc::new(FileStorage::new(&path)));
        store.clear().unwrap();
        assert_eq!(FileStorage::new(&path).get("applymate_token").unwrap(), None);

        store.set_tokens(&TokenPair::new("A1", "R1")).unwrap();
        let reopened = TokenStore::new(Arc::new(FileStorage::new(&path)));
        assert_eq!(reopened.access(), "A1");
        assert_eq!(reopened.refresh(), "R1");
    }

    #[test]
    fn stale_temp_file_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(path.with_extension("tmp"), "leftover").unwrap();

        FileStorage::new(&path).set("applymate_token", "A1").unwrap();

        assert_eq!(FileStorage::new(&path).get("applymate_token").unwrap().as_deref(), Some("A1"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        FileStorage::new(&path).set("applymate_token", "A1").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
