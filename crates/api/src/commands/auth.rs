//! Account and session commands

use applymate_domain::{ApplyMateError, LoginRequest, RegisterRequest, RegisteredUser, Result};
use applymate_infra::InfraError;
use tracing::info;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Sign in and keep the returned token pair as the session
///
/// # Errors
/// - the backend error for rejected credentials (`HTTP 401: ...`)
/// - `ApplyMateError::Auth` when the response carries no access token
pub async fn login(ctx: &AppContext, username: &str, password: &str) -> Result<()> {
    execute_command("auth::login", || async {
        let pair = ctx.api.login(&LoginRequest::new(username, password)).await?;
        if !pair.has_access() {
            return Err(ApplyMateError::Auth("login response carried no access token".into()));
        }

        ctx.tokens.set_tokens(&pair).map_err(InfraError::from)?;
        info!(username, has_refresh = pair.has_refresh(), "Signed in");
        Ok(())
    })
    .await
}

/// Create an account; does not sign in
pub async fn register(
    ctx: &AppContext,
    username: &str,
    email: &str,
    password: &str,
) -> Result<RegisteredUser> {
    execute_command("auth::register", || async {
        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        Ok(ctx.api.register(&request).await?)
    })
    .await
}

/// End the session: forget both tokens and drop the cached board
pub async fn logout(ctx: &AppContext) -> Result<()> {
    execute_command("auth::logout", || async { ctx.logout() }).await
}

/// Account behind the current session
pub async fn current_user(ctx: &AppContext) -> Result<RegisteredUser> {
    execute_command("auth::current_user", || async {
        ctx.require_session()?;
        Ok(ctx.api.current_user().await?)
    })
    .await
}
