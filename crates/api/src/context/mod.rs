//! Application context - dependency injection container

use std::sync::Arc;

use applymate_common::auth::TokenStore;
use applymate_core::StageBoard;
use applymate_domain::{ApplyMateError, ClientConfig, Result};
use applymate_infra::config::loader;
use applymate_infra::{open_token_store, ApiClient, ApiClientConfig, ApiCommands, InfraError};
use tracing::{info, warn};

/// Application context - holds the session and every service built on it
pub struct AppContext {
    /// Configuration the context was built from
    pub config: ClientConfig,
    /// Session token store shared with the API client
    pub tokens: TokenStore,
    /// Typed backend operations
    pub api: ApiCommands,
    /// Optimistic copy of the application board
    pub board: Arc<StageBoard>,
}

impl AppContext {
    /// Load `.env`, then configuration, then build the context
    ///
    /// # Errors
    /// Returns `ApplyMateError::Config` for invalid configuration.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => info!(path = %path.display(), "Loaded .env"),
            Err(e) => warn!(error = %e, "Could not load .env file"),
        }

        Self::new(loader::load()?)
    }

    /// Build the context, opening the session store the config selects
    ///
    /// # Errors
    /// Returns `ApplyMateError::Config` when the session backend or the API
    /// base URL is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let tokens = open_token_store(&config.session)?;
        Self::with_token_store(config, tokens)
    }

    /// Build the context around an existing session store
    ///
    /// # Errors
    /// Returns `ApplyMateError::Config` when the API base URL is invalid.
    pub fn with_token_store(config: ClientConfig, tokens: TokenStore) -> Result<Self> {
        let client = ApiClient::new(ApiClientConfig::from(&config.api), tokens.clone())?;
        let api = ApiCommands::new(Arc::new(client));

        info!(
            base_url = %config.api.base_url,
            authenticated = tokens.is_authenticated(),
            "Application context initialized"
        );

        Ok(Self { config, tokens, api, board: Arc::new(StageBoard::default()) })
    }

    /// Whether an access token is stored
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }

    /// Gate for views that need a signed-in user
    ///
    /// # Errors
    /// Returns `ApplyMateError::Auth` when no session is stored.
    pub fn require_session(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(ApplyMateError::Auth("sign in required".to_string()))
        }
    }

    /// Forget the session and everything loaded under it
    ///
    /// # Errors
    /// Returns `ApplyMateError::Storage` when the stored tokens cannot be
    /// removed.
    pub fn logout(&self) -> Result<()> {
        self.board.clear();
        self.tokens.clear().map_err(InfraError::from)?;
        info!("Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("base_url", &self.config.api.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
