//! Session construction from configuration

use std::sync::Arc;

use applymate_common::auth::{KeyValueStorage, KeychainStorage, MemoryStorage, TokenStore};
use applymate_domain::{ApplyMateError, Result, SessionBackend, SessionConfig};
use tracing::info;

use crate::storage::FileStorage;

/// Open the token store selected by `config`
///
/// # Errors
/// Returns `ApplyMateError::Config` when the file backend has no path.
pub fn open_token_store(config: &SessionConfig) -> Result<TokenStore> {
    let storage: Arc<dyn KeyValueStorage> = match config.backend {
        SessionBackend::Memory => Arc::new(MemoryStorage::new()),
        SessionBackend::File => {
            let path = config.path.as_ref().ok_or_else(|| {
                ApplyMateError::Config("session.path is required for the file backend".into())
            })?;
            Arc::new(FileStorage::new(path))
        }
        SessionBackend::Keychain => Arc::new(KeychainStorage::new(config.service_name.clone())),
    };

    info!(backend = ?config.backend, "Session store opened");
    Ok(TokenStore::new(storage))
}
