//! Command execution helpers
//!
//! Provides utilities to reduce boilerplate when implementing commands with
//! timing and outcome logging.

use std::future::Future;
use std::time::Instant;

use applymate_domain::Result as DomainResult;

use crate::utils::logging::{error_label, log_command_execution};

/// Execute a command with automatic timing and outcome logging
///
/// The result is returned unchanged.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn my_command(ctx: &AppContext) -> Result<MyResponse> {
///     execute_command("my_module::my_command", || async {
///         ctx.api.do_something().await.map_err(Into::into)
///     })
///     .await
/// }
/// ```
pub async fn execute_command<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    let error_type = result.as_ref().err().map(error_label);
    log_command_execution(command_name, start.elapsed(), error_type);

    result
}

/// Execute a command with String error conversion
///
/// Convenience wrapper for front ends that only display the message.
pub async fn execute_with_string_error<F, Fut, T>(
    command_name: &str,
    command_fn: F,
) -> Result<T, String>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    execute_command(command_name, command_fn).await.map_err(|e| e.to_string())
}
