//! Thin reqwest wrapper shared by the API client and the token refresher

use std::time::Duration;

use applymate_domain::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use applymate_domain::ApplyMateError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with a per-request timeout.
///
/// Every call is a single attempt; callers decide whether anything is worth
/// repeating.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, ApplyMateError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder once.
    ///
    /// Non-success statuses are returned as responses; only transport
    /// failures (connect, timeout, malformed request) are errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApplyMateError> {
        let request = builder.build().map_err(|err| ApplyMateError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: String,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    /// Per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `User-Agent` header value
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Headers sent on every request
    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns `ApplyMateError::Config` if reqwest rejects the settings.
    pub fn build(self) -> Result<HttpClient, ApplyMateError> {
        let mut builder =
            ReqwestClient::builder().timeout(self.timeout).user_agent(self.user_agent).no_proxy();

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| ApplyMateError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
