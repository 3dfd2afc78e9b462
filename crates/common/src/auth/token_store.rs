//! Access/refresh token persistence

use std::sync::Arc;

use applymate_domain::{constants, TokenPair};
use tracing::{debug, warn};

use super::storage::{KeyValueStorage, StorageError};

/// Session token store
///
/// Holds the access and refresh tokens under two fixed keys of a
/// [`KeyValueStorage`]. Reads never fail: a missing key or an unreadable
/// backend yields the empty string.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl TokenStore {
    /// Store backed by `storage`
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Current access token, or `""` when none is stored
    pub fn access(&self) -> String {
        self.read(constants::ACCESS_TOKEN_KEY)
    }

    /// Current refresh token, or `""` when none is stored
    pub fn refresh(&self) -> String {
        self.read(constants::REFRESH_TOKEN_KEY)
    }

    /// Both tokens as a pair
    pub fn tokens(&self) -> TokenPair {
        TokenPair::new(self.access(), self.refresh())
    }

    /// Write the non-empty fields of `tokens`
    ///
    /// An empty field leaves the stored value untouched, so a refresh
    /// response carrying only `access` keeps the existing refresh token.
    ///
    /// # Errors
    /// Returns error if the backend rejects a write
    pub fn set_tokens(&self, tokens: &TokenPair) -> Result<(), StorageError> {
        if tokens.has_access() {
            self.storage.set(constants::ACCESS_TOKEN_KEY, &tokens.access)?;
        }
        if tokens.has_refresh() {
            self.storage.set(constants::REFRESH_TOKEN_KEY, &tokens.refresh)?;
        }

        debug!(
            access_written = tokens.has_access(),
            refresh_written = tokens.has_refresh(),
            "Session tokens stored"
        );
        Ok(())
    }

    /// Remove both tokens (idempotent)
    ///
    /// Both removals are attempted even when the first one fails.
    ///
    /// # Errors
    /// Returns the first error the backend reported
    pub fn clear(&self) -> Result<(), StorageError> {
        let access = self.storage.remove(constants::ACCESS_TOKEN_KEY);
        let refresh = self.storage.remove(constants::REFRESH_TOKEN_KEY);
        access.and(refresh)?;
        debug!("Session tokens cleared");
        Ok(())
    }

    /// True iff an access token is present
    pub fn is_authenticated(&self) -> bool {
        !self.access().is_empty()
    }

    fn read(&self, key: &str) -> String {
        match self.storage.get(key) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read session token");
                String::new()
            }
        }
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
