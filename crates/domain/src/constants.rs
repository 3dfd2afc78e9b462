//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! client.

// Backend location
/// Backend used when nothing is configured
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";
/// Path prefix the API is mounted under
pub const API_PATH_SUFFIX: &str = "/api";
/// Per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// `User-Agent` header value
pub const DEFAULT_USER_AGENT: &str = concat!("applymate-client/", env!("CARGO_PKG_VERSION"));

// Session persistence keys
/// Storage key of the access token
pub const ACCESS_TOKEN_KEY: &str = "applymate_token";
/// Storage key of the refresh token
pub const REFRESH_TOKEN_KEY: &str = "applymate_refresh";
/// Keychain service name
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "ApplyMate.session";

/// Marker in a 401 body that separates "token invalid/expired" from other
/// authentication failures. Quoted because it is matched against raw JSON.
pub const TOKEN_INVALID_SENTINEL: &str = "\"token_not_valid\"";

// Auth endpoints (resolved against the host root)
/// Account registration
pub const REGISTER_PATH: &str = "/auth/register/";
/// Token pair for credentials
pub const TOKEN_PATH: &str = "/auth/token/";
/// Access token for a refresh token
pub const TOKEN_REFRESH_PATH: &str = "/auth/token/refresh/";
/// Signed-in account
pub const CURRENT_USER_PATH: &str = "/auth/me/";

// Job drafting fallbacks
/// Label for resumes uploaded without one
pub const DEFAULT_RESUME_LABEL: &str = "Base Resume";
/// Company shown when extraction found none
pub const UNKNOWN_COMPANY: &str = "Unknown";
/// Title shown when extraction found none
pub const UNTITLED_JOB: &str = "Untitled";
