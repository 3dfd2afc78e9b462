//! Configuration management

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE, DEFAULT_KEYCHAIN_SERVICE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

/// Client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend connection
    pub api: ApiConfig,
    /// Session persistence
    pub session: SessionConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix, e.g. `http://127.0.0.1:8000/api`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl ApiConfig {
    /// Timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Where the session tokens live between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Process memory only; the session ends with the process
    #[default]
    Memory,
    /// JSON file on disk (`SessionConfig::path`)
    File,
    /// Platform keychain
    Keychain,
}

impl std::str::FromStr for SessionBackend {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "keychain" => Ok(Self::Keychain),
            other => Err(format!("unknown session backend '{other}'")),
        }
    }
}

/// Session persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Token storage backend
    pub backend: SessionBackend,
    /// Session file for the file backend
    pub path: Option<PathBuf>,
    /// Keychain service name for the keychain backend
    pub service_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::Memory,
            path: None,
            service_name: DEFAULT_KEYCHAIN_SERVICE.to_string(),
        }
    }
}
