//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `APPLYMATE_API_BASE` is not set, falls back to a config file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. With no file found, uses built-in defaults
//!
//! ## Environment Variables
//! - `APPLYMATE_API_BASE`: API base URL (required for the env path)
//! - `APPLYMATE_API_TIMEOUT_SECS`: Request timeout in seconds
//! - `APPLYMATE_USER_AGENT`: User-Agent header value
//! - `APPLYMATE_SESSION_BACKEND`: `memory`, `file`, or `keychain`
//! - `APPLYMATE_SESSION_PATH`: Session file path (file backend)
//! - `APPLYMATE_KEYCHAIN_SERVICE`: Keychain service name (keychain backend)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./applymate.json` or `./applymate.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../applymate.json` or `../applymate.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use applymate_domain::{
    ApiConfig, ApplyMateError, ClientConfig, Result, SessionBackend, SessionConfig,
};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["applymate.json", "applymate.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// Environment first when `APPLYMATE_API_BASE` is set, then the first
/// config file found, then defaults. Invalid environment values are errors,
/// never a reason to fall back.
///
/// # Errors
/// Returns `ApplyMateError::Config` if an environment variable or a found
/// config file holds an invalid value.
pub fn load() -> Result<ClientConfig> {
    if env_opt("APPLYMATE_API_BASE").is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }
    tracing::debug!("APPLYMATE_API_BASE not set, trying config file");

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No config file found, using defaults");
            Ok(ClientConfig::default())
        }
    }
}

/// Load configuration from environment variables
///
/// `APPLYMATE_API_BASE` must be set; every other variable is optional and
/// falls back to its default.
///
/// # Errors
/// Returns `ApplyMateError::Config` if the base URL is missing or a variable
/// has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let base_url = env_var("APPLYMATE_API_BASE")?;

    let mut api = ApiConfig { base_url, ..ApiConfig::default() };
    if let Some(raw) = env_opt("APPLYMATE_API_TIMEOUT_SECS") {
        api.timeout_secs = raw
            .parse::<u64>()
            .map_err(|e| ApplyMateError::Config(format!("Invalid timeout: {}", e)))?;
    }
    if let Some(agent) = env_opt("APPLYMATE_USER_AGENT") {
        api.user_agent = agent;
    }

    let mut session = SessionConfig::default();
    if let Some(raw) = env_opt("APPLYMATE_SESSION_BACKEND") {
        session.backend = raw.parse::<SessionBackend>().map_err(ApplyMateError::Config)?;
    }
    session.path = env_opt("APPLYMATE_SESSION_PATH").map(PathBuf::from);
    if let Some(service) = env_opt("APPLYMATE_KEYCHAIN_SERVICE") {
        session.service_name = service;
    }

    Ok(ClientConfig { api, session })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ApplyMateError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ApplyMateError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ApplyMateError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ApplyMateError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ApplyMateError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ApplyMateError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ApplyMateError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `ApplyMateError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        ApplyMateError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; empty values count as unset
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
