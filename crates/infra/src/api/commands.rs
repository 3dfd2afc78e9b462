//! API commands for backend operations
//!
//! Each operation shapes one call (method, path, body, auth flag) and
//! returns the dispatcher's result unchanged.

use std::sync::Arc;

use applymate_core::ApplicationGateway;
use applymate_domain::constants::{CURRENT_USER_PATH, REGISTER_PATH, TOKEN_PATH};
use applymate_domain::{
    Application, ApplicationUpdate, ExtractRequest, FitRequest, FitResult, GenerateDocumentRequest,
    GeneratedDocument, HealthStatus, Job, JobDescription, LoginRequest, NewApplication, NewJob,
    RegisterRequest, RegisteredUser, Resume, Stage, TokenPair,
};
use async_trait::async_trait;
use tracing::{debug, instrument};
use urlencoding::encode;

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::{MultipartUpload, RequestDescriptor};

/// Typed catalogue of backend operations
#[derive(Debug, Clone)]
pub struct ApiCommands {
    client: Arc<ApiClient>,
}

impl ApiCommands {
    /// Create a new commands instance
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Underlying request dispatcher
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // === Public Operations ===

    /// Backend liveness probe
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.client.send(RequestDescriptor::get("/health/").public()).await
    }

    /// Parse a job posting (link and/or pasted text) into structured fields
    #[instrument(skip(self, request), fields(has_url = !request.url.is_empty()))]
    pub async fn extract_job_description(
        &self,
        request: &ExtractRequest,
    ) -> Result<JobDescription, ApiError> {
        let descriptor = RequestDescriptor::post("/jobs/extract/").public().json(request)?;
        self.client.send(descriptor).await
    }

    // === Account Operations ===

    /// Create an account
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisteredUser, ApiError> {
        let descriptor = RequestDescriptor::post(REGISTER_PATH).public().at_root().json(request)?;
        self.client.send(descriptor).await
    }

    /// Exchange credentials for a token pair; the caller decides where to keep it
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenPair, ApiError> {
        let descriptor = RequestDescriptor::post(TOKEN_PATH).public().at_root().json(request)?;
        self.client.send(descriptor).await
    }

    /// Account behind the current session
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<RegisteredUser, ApiError> {
        self.client.send(RequestDescriptor::get(CURRENT_USER_PATH).at_root()).await
    }

    // === Job Operations ===

    /// `POST /jobs/`
    #[instrument(skip(self, job), fields(title = %job.title))]
    pub async fn create_job(&self, job: &NewJob) -> Result<Job, ApiError> {
        let created: Job = self.client.post("/jobs/", job).await?;
        debug!(job_id = created.id, "Job created");
        Ok(created)
    }

    /// List saved jobs, optionally filtered by a search query
    #[instrument(skip(self))]
    pub async fn list_jobs(&self, query: Option<&str>) -> Result<Vec<Job>, ApiError> {
        let path = match query.filter(|q| !q.is_empty()) {
            Some(q) => format!("/jobs/?q={}", encode(q)),
            None => "/jobs/".to_string(),
        };
        self.client.get(&path).await
    }

    /// `GET /jobs/{id}/`
    #[instrument(skip(self))]
    pub async fn get_job(&self, id: i64) -> Result<Job, ApiError> {
        self.client.get(&format!("/jobs/{id}/")).await
    }

    /// `DELETE /jobs/{id}/`
    #[instrument(skip(self))]
    pub async fn delete_job(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/jobs/{id}/")).await
    }

    // === Application Operations ===

    /// List applications, optionally for a single job
    #[instrument(skip(self))]
    pub async fn list_applications(&self, job_id: Option<i64>) -> Result<Vec<Application>, ApiError> {
        let path = match job_id {
            Some(id) => format!("/apps/?job_id={id}"),
            None => "/apps/".to_string(),
        };
        self.client.get(&path).await
    }

    /// `POST /apps/`
    #[instrument(skip(self, application), fields(job_id = application.job))]
    pub async fn create_application(
        &self,
        application: &NewApplication,
    ) -> Result<Application, ApiError> {
        self.client.post("/apps/", application).await
    }

    /// Partially update an application; unset fields are left untouched
    #[instrument(skip(self, update))]
    pub async fn update_application(
        &self,
        id: i64,
        update: &ApplicationUpdate,
    ) -> Result<Application, ApiError> {
        self.client.patch(&format!("/apps/{id}/"), update).await
    }

    /// `DELETE /apps/{id}/`
    #[instrument(skip(self))]
    pub async fn delete_application(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/apps/{id}/")).await
    }

    // === Fit & Documents ===

    /// `POST /fit/score/`
    #[instrument(skip(self))]
    pub async fn score_fit(&self, request: &FitRequest) -> Result<FitResult, ApiError> {
        self.client.post("/fit/score/", request).await
    }

    /// `POST /docs/generate/`
    #[instrument(skip(self), fields(kind = %request.kind))]
    pub async fn generate_document(
        &self,
        request: &GenerateDocumentRequest,
    ) -> Result<GeneratedDocument, ApiError> {
        self.client.post("/docs/generate/", request).await
    }

    // === Resumes ===

    /// Upload a resume file as multipart `{label, file}`
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_resume(
        &self,
        label: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Resume, ApiError> {
        let upload = MultipartUpload::new().text("label", label).file("file", file_name, bytes);
        self.client.send(RequestDescriptor::post("/resume/").multipart(upload)).await
    }

    /// `GET /resume/`
    #[instrument(skip(self))]
    pub async fn list_resumes(&self) -> Result<Vec<Resume>, ApiError> {
        self.client.get("/resume/").await
    }
}

#[async_trait]
impl ApplicationGateway for ApiCommands {
    async fn list_applications(
        &self,
        job_id: Option<i64>,
    ) -> applymate_domain::Result<Vec<Application>> {
        ApiCommands::list_applications(self, job_id).await.map_err(Into::into)
    }

    async fn update_stage(&self, id: i64, stage: Stage) -> applymate_domain::Result<Application> {
        self.update_application(id, &ApplicationUpdate::stage(stage)).await.map_err(Into::into)
    }
}
