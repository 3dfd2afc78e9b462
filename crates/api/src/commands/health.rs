//! Backend health check

use applymate_domain::{HealthStatus, Result};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Probe the backend; needs no session
pub async fn backend_health(ctx: &AppContext) -> Result<HealthStatus> {
    execute_command("health::backend_health", || async { Ok(ctx.api.health().await?) }).await
}
