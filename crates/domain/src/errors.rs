//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for ApplyMate
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ApplyMateError {
    /// Connection failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status with the server detail (or raw body)
    #[error("HTTP {status}: {detail}")]
    Http {
        /// Response status code
        status: u16,
        /// Server-provided message
        detail: String,
    },

    /// Session could not be refreshed; sign in again
    #[error("Session expired")]
    SessionExpired,

    /// Missing session or unusable credentials
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Requested item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input rejected before any request was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected failure inside the client
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplyMateError {
    /// Whether the caller should send the user back to the login view.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::Auth(_))
    }
}

/// Result type alias for ApplyMate operations
pub type Result<T> = std::result::Result<T, ApplyMateError>;
