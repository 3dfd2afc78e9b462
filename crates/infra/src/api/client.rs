//! Request dispatcher with token refresh
//!
//! Resolves paths against the configured backend, attaches the session
//! token, decodes JSON leniently, and turns an "invalid token" 401 into one
//! refresh exchange followed by a single retry.

use std::sync::Arc;
use std::time::Duration;

use applymate_common::auth::TokenStore;
use applymate_domain::constants::{
    API_PATH_SUFFIX, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    TOKEN_INVALID_SENTINEL, TOKEN_REFRESH_PATH,
};
use applymate_domain::ApiConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use super::errors::ApiError;
use super::refresh::RefreshCoordinator;
use super::request::{RequestBody, RequestDescriptor, Target};
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL including the API prefix (e.g., "http://127.0.0.1:8000/api")
    pub base_url: String,
    /// Timeout for each HTTP request
    pub timeout: Duration,
    /// `User-Agent` header sent on every request
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// API base and host root derived from the configured base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrls {
    api: String,
    root: String,
}

impl BaseUrls {
    /// Strip trailing slashes, then derive the root by dropping a trailing `/api`
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the base is not an absolute URL
    pub fn parse(base_url: &str) -> Result<Self, ApiError> {
        let api = base_url.trim().trim_end_matches('/').to_string();
        url::Url::parse(&api)
            .map_err(|e| ApiError::Config(format!("Invalid API base URL '{api}': {e}")))?;

        let root = api.strip_suffix(API_PATH_SUFFIX).unwrap_or(&api).to_string();
        Ok(Self { api, root })
    }

    /// API base without a trailing slash
    pub fn api(&self) -> &str {
        &self.api
    }

    /// Host root the API base is mounted under
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Absolute URL for `path`; a missing leading slash is added
    pub fn resolve(&self, path: &str, target: Target) -> String {
        let separator = if path.starts_with('/') { "" } else { "/" };
        match target {
            Target::Api => format!("{}{separator}{path}", self.api),
            Target::Root => format!("{}{API_PATH_SUFFIX}{separator}{path}", self.root),
        }
    }
}

/// Status and raw text of one response
struct RawResponse {
    status: StatusCode,
    body: String,
}

/// Outcome of the first attempt
enum FirstAttempt {
    Settled(Result<Value, ApiError>),
    /// Backend rejected the token as invalid; `stale` is the token that was sent
    TokenRejected { stale: String },
}

/// Outcome of the retry; no variant leads back to a refresh
struct RetryAttempt(Result<Value, ApiError>);

/// Request dispatcher bound to one session
pub struct ApiClient {
    http: HttpClient,
    urls: BaseUrls,
    tokens: TokenStore,
    refresher: Arc<RefreshCoordinator>,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// built
    pub fn new(config: ApiClientConfig, tokens: TokenStore) -> Result<Self, ApiError> {
        let urls = BaseUrls::parse(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        let refresher = RefreshCoordinator::new(
            http.clone(),
            urls.resolve(TOKEN_REFRESH_PATH, Target::Root),
            tokens.clone(),
        );

        Ok(Self { http, urls, tokens, refresher: Arc::new(refresher) })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Base URLs requests are resolved against
    pub fn urls(&self) -> &BaseUrls {
        &self.urls
    }

    /// Session token store
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Dispatch a request and return the decoded JSON body
    ///
    /// Empty bodies decode to `{}`; non-JSON bodies to `{"raw": <text>}`.
    ///
    /// # Errors
    ///
    /// - `ApiError::Http` for non-success statuses
    /// - `ApiError::SessionExpired` when the token could not be refreshed or
    ///   the retried request was rejected the same way
    /// - `ApiError::Network` for transport failures
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn request(&self, request: RequestDescriptor) -> Result<Value, ApiError> {
        let url = self.urls.resolve(&request.path, request.target);

        let stale = match self.first_attempt(&request, &url).await? {
            FirstAttempt::Settled(result) => return result,
            FirstAttempt::TokenRejected { stale } => stale,
        };

        debug!("Access token rejected, refreshing");
        let fresh = self.refresher.refresh(&stale).await?;

        let RetryAttempt(result) = self.retry_attempt(&request, &url, &fresh).await?;
        result
    }

    /// Dispatch a request and decode the body into `T`
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::request`], plus `ApiError::Decode` when the body
    /// does not match `T`
    pub async fn send<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T, ApiError> {
        let value = self.request(request).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Execute an authenticated GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(RequestDescriptor::get(path)).await
    }

    /// Execute an authenticated POST request with a JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(RequestDescriptor::post(path).json(body)?).await
    }

    /// Execute an authenticated PATCH request with a JSON body
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(RequestDescriptor::patch(path).json(body)?).await
    }

    /// Execute an authenticated DELETE request, discarding any body
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(RequestDescriptor::delete(path)).await.map(|_| ())
    }

    async fn first_attempt(
        &self,
        request: &RequestDescriptor,
        url: &str,
    ) -> Result<FirstAttempt, ApiError> {
        let token = if request.auth { self.tokens.access() } else { String::new() };
        let raw = self.execute(request, url, &token).await?;

        if request.auth && raw.status == StatusCode::UNAUTHORIZED {
            if raw.body.contains(TOKEN_INVALID_SENTINEL) {
                return Ok(FirstAttempt::TokenRejected { stale: token });
            }
            return Ok(FirstAttempt::Settled(Err(ApiError::Http {
                status: StatusCode::UNAUTHORIZED.as_u16(),
                detail: raw.body,
            })));
        }

        Ok(FirstAttempt::Settled(decode(raw)))
    }

    async fn retry_attempt(
        &self,
        request: &RequestDescriptor,
        url: &str,
        token: &str,
    ) -> Result<RetryAttempt, ApiError> {
        let raw = self.execute(request, url, token).await?;

        if raw.status == StatusCode::UNAUTHORIZED && raw.body.contains(TOKEN_INVALID_SENTINEL) {
            warn!("Refreshed token rejected, ending session");
            if let Err(e) = self.tokens.clear() {
                warn!(error = %e, "Failed to clear session tokens");
            }
            return Ok(RetryAttempt(Err(ApiError::SessionExpired)));
        }

        Ok(RetryAttempt(decode(raw)))
    }

    async fn execute(
        &self,
        request: &RequestDescriptor,
        url: &str,
        token: &str,
    ) -> Result<RawResponse, ApiError> {
        let mut headers = request.headers.clone();
        if request.auth && !token.is_empty() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::Config("access token is not a valid header value".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let builder = self.http.request(request.method.clone(), url).headers(headers);
        let builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(upload) => builder.multipart(upload.to_form()),
        };

        let response = self.http.send(builder).await?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        debug!(status = status.as_u16(), bytes = body.len(), "Response received");
        Ok(RawResponse { status, body })
    }
}

/// Lenient JSON decoding plus status check
fn decode(raw: RawResponse) -> Result<Value, ApiError> {
    let value = if raw.body.is_empty() {
        json!({})
    } else {
        serde_json::from_str(&raw.body).unwrap_or_else(|_| json!({ "raw": raw.body }))
    };

    if raw.status.is_success() {
        return Ok(value);
    }

    let detail = match value.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
        Some(detail) if !detail.is_null() => detail.to_string(),
        _ => raw.body,
    };
    Err(ApiError::Http { status: raw.status.as_u16(), detail })
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("urls", &self.urls).finish_non_exhaustive()
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    tokens: Option<TokenStore>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the session token store
    pub fn tokens(mut self, tokens: TokenStore) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the token store is missing or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let tokens =
            self.tokens.ok_or_else(|| ApiError::Config("Token store not set".to_string()))?;

        ApiClient::new(config, tokens)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use applymate_common::auth::MemoryStorage;
    use applymate_domain::TokenPair;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;
    use crate::api::request::MultipartUpload;

    const EXPIRED_BODY: &str =
        r#"{"detail":"Given token not valid for any token type","code":"token_not_valid"}"#;

    fn session(access: &str, refresh: &str) -> TokenStore {
        let store = TokenStore::new(Arc::new(MemoryStorage::new()));
        store.set_tokens(&TokenPair::new(access, refresh)).unwrap();
        store
    }

    fn client(server: &MockServer, tokens: &TokenStore) -> ApiClient {
        let config = ApiClientConfig {
            base_url: format!("{}/api/", server.uri()),
            ..ApiClientConfig::default()
        };
        ApiClient::new(config, tokens.clone()).unwrap()
    }

    async fn mount_refresh(server: &MockServer, access: &str, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/api/auth/token/refresh/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": access })))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    #[test]
    fn base_urls_strip_slashes_and_api_suffix() {
        let urls = BaseUrls::parse("http://localhost:8000/api///").unwrap();
        assert_eq!(urls.api(), "http://localhost:8000/api");
        assert_eq!(urls.root(), "http://localhost:8000");

        assert_eq!(urls.resolve("jobs/", Target::Api), "http://localhost:8000/api/jobs/");
        assert_eq!(urls.resolve("/jobs/", Target::Api), "http://localhost:8000/api/jobs/");
        assert_eq!(
            urls.resolve("/auth/token/", Target::Root),
            "http://localhost:8000/api/auth/token/"
        );
    }

    #[test]
    fn base_without_api_suffix_is_its_own_root() {
        let urls = BaseUrls::parse("https://jobs.example.com").unwrap();
        assert_eq!(urls.root(), "https://jobs.example.com");
        assert!(BaseUrls::parse("not a url").is_err());
    }

    #[tokio::test]
    async fn sends_exactly_one_bearer_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/jobs/"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(move |req: &Request| {
                let count = req.headers.get_all(AUTHORIZATION).iter().count();
                ResponseTemplate::new(200).set_body_json(json!({ "headers": count }))
            })
            .expect(1)
            .mount(&server)
            .await;

        let tokens = session("A1", "R1");
        let request = RequestDescriptor::get("/jobs/")
            .header(AUTHORIZATION, HeaderValue::from_static("Bearer caller-supplied"));
        let value = client(&server, &tokens).request(request).await.unwrap();

        assert_eq!(value["headers"], 1);
    }

    #[tokio::test]
    async fn requests_ask_for_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me/"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/token/refresh/"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "A2" })))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = session("A1", "R1");
        let api = client(&server, &tokens);
        let value = api.request(RequestDescriptor::get("auth/me/")).await.unwrap();
        assert_eq!(value["id"], 1);

        api.refresher.refresh("A1").await.unwrap();
        assert_eq!(tokens.access(), "A2");
    }

    #[tokio::test]
    async fn public_requests_carry_no_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health/"))
            .respond_with(|req: &Request| {
                let has_auth = req.headers.contains_key(AUTHORIZATION);
                ResponseTemplate::new(200).set_body_json(json!({ "auth": has_auth }))
            })
            .mount(&server)
            .await;

        let tokens = session("A1", "R1");
        let value =
            client(&server, &tokens).request(RequestDescriptor::get("health/").public()).await;

        assert_eq!(value.unwrap()["auth"], false);
    }

    #[tokio::test]
    async fn missing_token_sends_request_without_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(|req: &Request| {
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "auth": req.headers.contains_key(AUTHORIZATION) }))
            })
            .mount(&server)
            .await;

        let tokens = session("", "");
        let value = client(&server, &tokens).request(RequestDescriptor::get("/jobs/")).await;

        assert_eq!(value.unwrap()["auth"], false);
    }

    #[tokio::test]
    async fn empty_and_non_json_bodies_decode_leniently() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .mount(&server)
            .await;

        let tokens = session("A1", "R1");
        let api = client(&server, &tokens);

        let empty = api.request(RequestDescriptor::delete("/jobs/1/")).await.unwrap();
        assert_eq!(empty, json!({}));

        let raw = api.request(RequestDescriptor::get("/health/")).await.unwrap();
        assert_eq!(raw, json!({ "raw": "OK" }));
    }

    #[tokio::test]
    async fn error_detail_prefers_server_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/jobs/1/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/jobs/2/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Server Error</h1>"))
            .mount(&server)
            .await;

        let tokens = session("A1", "R1");
        let api = client(&server, &tokens);

        let not_found = api.request(RequestDescriptor::get("/jobs/1/")).await.unwrap_err();
        assert_eq!(not_found.to_string(), "HTTP 404: Not found.");

        let server_error = api.request(RequestDescriptor::get("/jobs/2/")).await.unwrap_err();
        assert_eq!(server_error.to_string(), "HTTP 500: <h1>Server Error</h1>");
    }

    #[tokio::test]
    async fn plain_401_is_final_without_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/jobs/"))
            .respond_with(ResponseTemplate::new(401).set_body_string(
                r#"{"detail":"Authentication credentials were not provided."}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        mount_refresh(&server, "A2", 0).await;

        let tokens = session("A1", "R1");
        let err = client(&server, &tokens).request(RequestDescriptor::get("/jobs/")).await;

        assert_eq!(
            err.unwrap_err().to_string(),
            r#"HTTP 401: {"detail":"Authentication credentials were not provided."}"#
        );
        assert_eq!(tokens.access(), "A1");
    }

    #[tokio::test]
    async fn expired_token_refreshes_once_and_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/jobs/"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(401).set_body_string(EXPIRED_BODY))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/jobs/"))
            .and(header("authorization", "Bearer A2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
            .expect(1)
            .mount(&server)
            .await;
        mount_refresh(&server, "A2", 1).await;

        let tokens = session("A1", "R1");
        let value = client(&server, &tokens).request(RequestDescriptor::get("/jobs/")).await;

        assert_eq!(value.unwrap(), json!([{ "id": 1 }]));
        assert_eq!(tokens.access(), "A2");
        assert_eq!(tokens.refresh(), "R1");
    }

    #[tokio::test]
    async fn second_token_rejection_ends_session_without_second_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/jobs/"))
            .respond_with(ResponseTemplate::new(401).set_body_string(EXPIRED_BODY))
            .expect(2)
            .mount(&server)
            .await;
        mount_refresh(&server, "A2", 1).await;

        let tokens = session("A1", "R1");
        let err = client(&server, &tokens).request(RequestDescriptor::get("/jobs/")).await;

        assert!(err.unwrap_err().is_session_expired());
        assert!(!tokens.is_authenticated());
        assert_eq!(tokens.refresh(), "");
    }

    #[tokio::test]
    async fn retry_failure_without_sentinel_is_plain_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(401).set_body_string(EXPIRED_BODY))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer A2"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "detail": "Forbidden" })))
            .mount(&server)
            .await;
        mount_refresh(&server, "A2", 1).await;

        let tokens = session("A1", "R1");
        let err = client(&server, &tokens).request(RequestDescriptor::get("/jobs/")).await;

        assert_eq!(err.unwrap_err().to_string(), "HTTP 403: Forbidden");
        assert_eq!(tokens.access(), "A2");
    }

    #[tokio::test]
    async fn failed_refresh_clears_tokens_and_reports_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/jobs/"))
            .respond_with(ResponseTemplate::new(401).set_body_string(EXPIRED_BODY))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/token/refresh/"))
            .respond_with(ResponseTemplate::new(401).set_body_string(EXPIRED_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = session("A1", "R1");
        let err = client(&server, &tokens).request(RequestDescriptor::get("/jobs/")).await;

        assert!(err.unwrap_err().is_session_expired());
        assert_eq!(tokens.access(), "");
        assert_eq!(tokens.refresh(), "");
    }

    #[tokio::test]
    async fn public_401_never_refreshes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/token/"))
            .respond_with(ResponseTemplate::new(401).set_body_string(EXPIRED_BODY))
            .mount(&server)
            .await;
        mount_refresh(&server, "A2", 0).await;

        let tokens = session("A1", "R1");
        let request = RequestDescriptor::post("/auth/token/").public().at_root();
        let err = client(&server, &tokens).request(request).await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "HTTP 401: Given token not valid for any token type");
    }

    #[tokio::test]
    async fn concurrent_expiry_triggers_single_exchange() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(401).set_body_string(EXPIRED_BODY))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer A2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&server)
            .await;
        mount_refresh(&server, "A2", 1).await;

        let tokens = session("A1", "R1");
        let api = client(&server, &tokens);

        let (first, second) = tokio::join!(
            api.request(RequestDescriptor::get("/jobs/")),
            api.request(RequestDescriptor::get("/apps/")),
        );

        assert_eq!(first.unwrap()["ok"], true);
        assert_eq!(second.unwrap()["ok"], true);
    }

    #[tokio::test]
    async fn multipart_upload_is_rebuilt_for_retry() {
        let server = MockServer::start().await;
        let uploads = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&uploads);
        Mock::given(method("POST"))
            .and(path("/api/resume/"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(401).set_body_string(EXPIRED_BODY))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/resume/"))
            .and(header("authorization", "Bearer A2"))
            .respond_with(move |req: &Request| {
                let body = String::from_utf8_lossy(&req.body).to_string();
                if body.contains("Base Resume") && body.contains("cv.pdf") {
                    seen.fetch_add(1, Ordering::SeqCst);
                }
                ResponseTemplate::new(201).set_body_json(json!({ "id": 5, "label": "Base Resume" }))
            })
            .mount(&server)
            .await;
        mount_refresh(&server, "A2", 1).await;

        let tokens = session("A1", "R1");
        let upload = MultipartUpload::new().text("label", "Base Resume").file(
            "file",
            "cv.pdf",
            b"%PDF-1.7".to_vec(),
        );
        let value = client(&server, &tokens)
            .request(RequestDescriptor::post("/resume/").multipart(upload))
            .await
            .unwrap();

        assert_eq!(value["id"], 5);
        assert_eq!(uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn typed_helper_reports_decode_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let tokens = session("A1", "R1");
        let err = client(&server, &tokens).get::<Vec<i64>>("/jobs/").await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn builder_requires_token_store() {
        assert!(ApiClient::builder().build().is_err());

        let tokens = TokenStore::new(Arc::new(MemoryStorage::new()));
        let built = ApiClient::builder().tokens(tokens).build().unwrap();
        assert_eq!(built.urls().api(), "http://127.0.0.1:8000/api");
    }
}
