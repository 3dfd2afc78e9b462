//! Access token refresh
//!
//! Exchanges the stored refresh token for a new access token when the
//! backend reports the current one as invalid. Any failure ends the session.

use applymate_common::auth::TokenStore;
use applymate_domain::{RefreshRequest, RefreshResponse, TokenPair};
use reqwest::Method;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Serializes refresh exchanges for one session
///
/// Callers that wait on the guard while another caller rotates the token
/// pick up the rotated token instead of spending the refresh token again.
pub struct RefreshCoordinator {
    http: HttpClient,
    endpoint: String,
    tokens: TokenStore,
    in_flight: Mutex<()>,
}

impl RefreshCoordinator {
    /// `endpoint` is the absolute URL of the token refresh route
    pub fn new(http: HttpClient, endpoint: impl Into<String>, tokens: TokenStore) -> Self {
        Self { http, endpoint: endpoint.into(), tokens, in_flight: Mutex::new(()) }
    }

    /// Absolute URL of the refresh route
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Obtain a fresh access token to replace `stale_access`
    ///
    /// # Errors
    /// Returns `ApiError::SessionExpired` (after clearing the session) when no
    /// refresh token is stored or the exchange fails in any way, and
    /// `ApiError::Storage` when the new token cannot be persisted.
    #[instrument(skip_all)]
    pub async fn refresh(&self, stale_access: &str) -> Result<String, ApiError> {
        let _guard = self.in_flight.lock().await;

        let current = self.tokens.access();
        if !current.is_empty() && current != stale_access {
            debug!("Access token already rotated by a concurrent refresh");
            return Ok(current);
        }

        let refresh = self.tokens.refresh();
        if refresh.is_empty() {
            return Err(self.expire("no refresh token stored"));
        }

        let pair = match self.exchange(&refresh).await {
            Ok(pair) => pair,
            Err(reason) => return Err(self.expire(&reason)),
        };

        self.tokens.set_tokens(&pair)?;
        info!(rotated_refresh = pair.has_refresh(), "Access token refreshed");
        Ok(pair.access)
    }

    async fn exchange(&self, refresh: &str) -> Result<TokenPair, String> {
        let request =
            self.http.request(Method::POST, &self.endpoint).json(&RefreshRequest { refresh });

        let response = self.http.send(request).await.map_err(|e| e.to_string())?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("refresh endpoint returned {status}"));
        }

        let body = response.text().await.map_err(|e| e.to_string())?;
        let parsed: RefreshResponse = serde_json::from_str(&body)
            .map_err(|e| format!("unreadable refresh response: {e}"))?;

        let pair = TokenPair::from(parsed);
        if !pair.has_access() {
            return Err("refresh response carried no access token".to_string());
        }
        Ok(pair)
    }

    fn expire(&self, reason: &str) -> ApiError {
        warn!(reason = %reason, "Session expired, clearing tokens");
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "Failed to clear session tokens");
        }
        ApiError::SessionExpired
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator").field("endpoint", &self.endpoint).finish()
    }
}
