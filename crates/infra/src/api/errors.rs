//! API-specific error types
//!
//! Every failure of the request layer surfaces as one [`ApiError`]; the
//! `Display` form is what the user sees.

use applymate_common::auth::StorageError;
use applymate_domain::ApplyMateError;
use thiserror::Error;

/// Categories of API errors for callers that branch on failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Session is gone (expired tokens or a 401); send the user to login
    Authentication,
    /// Other 4xx responses, including 403 on a valid session
    Client,
    /// 5xx responses
    Server,
    /// Connection failures and timeouts
    Network,
    /// A success response did not have the expected shape
    Decode,
    /// Misconfiguration or local storage failure
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success status; `detail` is the server's `detail` field or the raw body
    #[error("HTTP {status}: {detail}")]
    Http {
        /// Response status code
        status: u16,
        /// Server-provided message
        detail: String,
    },

    /// Refresh failed or no refresh token; the session was cleared
    #[error("Session expired")]
    SessionExpired,

    /// Connection failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Success response with an unexpected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Invalid configuration or an unserializable request body
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session store failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::SessionExpired => ApiErrorCategory::Authentication,
            Self::Http { status: 401, .. } => ApiErrorCategory::Authentication,
            Self::Http { status, .. } if *status >= 500 => ApiErrorCategory::Server,
            Self::Http { .. } => ApiErrorCategory::Client,
            Self::Network(_) => ApiErrorCategory::Network,
            Self::Decode(_) => ApiErrorCategory::Decode,
            Self::Config(_) | Self::Storage(_) => ApiErrorCategory::Config,
        }
    }

    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the user has to sign in again
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

impl From<ApiError> for ApplyMateError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http { status, detail } => ApplyMateError::Http { status, detail },
            ApiError::SessionExpired => ApplyMateError::SessionExpired,
            ApiError::Network(message) => ApplyMateError::Network(message),
            ApiError::Decode(message) => ApplyMateError::Internal(message),
            ApiError::Config(message) => ApplyMateError::Config(message),
            ApiError::Storage(message) => ApplyMateError::Storage(message),
        }
    }
}

/// Map transport-level domain errors (from [`crate::http::HttpClient`])
impl From<ApplyMateError> for ApiError {
    fn from(err: ApplyMateError) -> Self {
        match err {
            ApplyMateError::Http { status, detail } => Self::Http { status, detail },
            ApplyMateError::SessionExpired => Self::SessionExpired,
            ApplyMateError::Network(message) => Self::Network(message),
            ApplyMateError::Config(message) | ApplyMateError::InvalidInput(message) => {
                Self::Config(message)
            }
            ApplyMateError::Storage(message) => Self::Storage(message),
            other => Self::Network(other.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}
