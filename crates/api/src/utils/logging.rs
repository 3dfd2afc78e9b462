//! Tracing subscriber setup and timing helpers

use std::str::FromStr;
use std::time::Duration;

use applymate_domain::ApplyMateError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Read `APPLYMATE_LOG_FORMAT`; anything unrecognised means text.
    pub fn from_env() -> Self {
        std::env::var("APPLYMATE_LOG_FORMAT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
///
/// # Errors
/// Fails when a global subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"board::move_application"`).
/// * `elapsed` - Duration the command execution took.
/// * `error_type` - [`error_label`] of the failure, `None` on success.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error_type: Option<&str>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error_type {
        None => info!(command, duration_ms, success = true, "command_execution_success"),
        Some(error_type) => {
            warn!(command, duration_ms, success = false, error_type, "command_execution_failure")
        }
    }
}

/// Convert an `ApplyMateError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &ApplyMateError) -> &'static str {
    match error {
        ApplyMateError::Network(_) => "network",
        ApplyMateError::Http { .. } => "http",
        ApplyMateError::SessionExpired => "session_expired",
        ApplyMateError::Auth(_) => "auth",
        ApplyMateError::Config(_) => "config",
        ApplyMateError::Storage(_) => "storage",
        ApplyMateError::NotFound(_) => "not_found",
        ApplyMateError::InvalidInput(_) => "invalid_input",
        ApplyMateError::Internal(_) => "internal",
    }
}
