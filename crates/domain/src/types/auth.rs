//! Session and account types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access/refresh token pair issued by the token endpoint
///
/// An empty string means the token is absent. The access token is short-lived
/// and sent on every authenticated call; the refresh token only mints new
/// access tokens.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenPair {
    /// Short-lived bearer token
    pub access: String,
    /// Token used to mint new access tokens
    pub refresh: String,
}

impl TokenPair {
    /// Pair from both tokens
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self { access: access.into(), refresh: refresh.into() }
    }

    /// Pair carrying only a new access token (refresh exchange result)
    pub fn access_only(access: impl Into<String>) -> Self {
        Self { access: access.into(), refresh: String::new() }
    }

    /// Whether an access token is present
    pub fn has_access(&self) -> bool {
        !self.access.is_empty()
    }

    /// Whether a refresh token is present
    pub fn has_refresh(&self) -> bool {
        !self.refresh.is_empty()
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &redact(&self.access))
            .field("refresh", &redact(&self.refresh))
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<absent>"
    } else {
        "<redacted>"
    }
}

/// Body of `POST /auth/register/`
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    /// Login name
    pub username: String,
    /// Contact address
    pub email: String,
    /// Plain-text password
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /auth/token/`
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    /// Login name
    pub username: String,
    /// Plain-text password
    pub password: String,
}

impl LoginRequest {
    /// Credentials for the token endpoint
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account returned by registration and `/auth/me/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisteredUser {
    /// Server id
    pub id: i64,
    /// Login name
    pub username: String,
    /// Contact address
    pub email: String,
}

/// Body of `POST /auth/token/refresh/`
#[derive(Clone, Serialize)]
pub struct RefreshRequest<'a> {
    /// Refresh token to exchange
    pub refresh: &'a str,
}

/// Refresh response; `refresh` is only present when the server rotates it
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct RefreshResponse {
    /// New access token
    pub access: String,
    /// Rotated refresh token, if any
    pub refresh: Option<String>,
}

impl From<RefreshResponse> for TokenPair {
    fn from(response: RefreshResponse) -> Self {
        Self { access: response.access, refresh: response.refresh.unwrap_or_default() }
    }
}
