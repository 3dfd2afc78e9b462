//! Job commands: drafting from a posting, saving, and detail loading

use applymate_core::JobDraft;
use applymate_domain::{
    Application, ApplyMateError, ExtractRequest, Job, NewApplication, Result, Stage,
};
use serde::Serialize;
use tracing::info;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// A job with the applications tracked for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDetail {
    /// The job itself
    pub job: Job,
    /// Applications already tracking this job
    pub applications: Vec<Application>,
}

/// Extract a posting into a draft the user can review before saving
///
/// # Errors
/// Returns `ApplyMateError::InvalidInput` when both `url` and `jd_text` are
/// blank; otherwise the backend error.
pub async fn preview_job(ctx: &AppContext, url: &str, jd_text: &str) -> Result<JobDraft> {
    execute_command("jobs::preview_job", || async {
        let url = url.trim();
        if url.is_empty() && jd_text.trim().is_empty() {
            return Err(ApplyMateError::InvalidInput(
                "paste a job description or a link".to_string(),
            ));
        }

        let request = ExtractRequest { url: url.to_string(), jd_text: jd_text.to_string() };
        let extracted = ctx.api.extract_job_description(&request).await?;
        Ok(JobDraft::new(url, jd_text, extracted))
    })
    .await
}

/// Persist a previewed draft as a job
pub async fn save_job(ctx: &AppContext, draft: &JobDraft) -> Result<Job> {
    execute_command("jobs::save_job", || async {
        ctx.require_session()?;
        let job = ctx.api.create_job(&draft.to_new_job()).await?;
        info!(job_id = job.id, "Job saved");
        Ok(job)
    })
    .await
}

/// List saved jobs, optionally filtered by `query`
pub async fn list_jobs(ctx: &AppContext, query: Option<&str>) -> Result<Vec<Job>> {
    execute_command("jobs::list_jobs", || async {
        ctx.require_session()?;
        Ok(ctx.api.list_jobs(query.map(str::trim)).await?)
    })
    .await
}

/// Job and its applications, fetched concurrently
pub async fn load_job_detail(ctx: &AppContext, id: i64) -> Result<JobDetail> {
    execute_command("jobs::load_job_detail", || async {
        ctx.require_session()?;
        let (job, applications) =
            futures::try_join!(ctx.api.get_job(id), ctx.api.list_applications(Some(id)))?;
        Ok(JobDetail { job, applications })
    })
    .await
}

/// Start tracking a job in `stage` and show it on the board
///
/// The job view offers "Save" (`Stage::Saved`) and "Mark Applied"
/// (`Stage::Applied`).
pub async fn track_job(ctx: &AppContext, job_id: i64, stage: Stage) -> Result<Application> {
    execute_command("jobs::track_job", || async {
        ctx.require_session()?;
        let application =
            ctx.api.create_application(&NewApplication { job: job_id, stage }).await?;
        ctx.board.insert(application.clone());
        Ok(application)
    })
    .await
}

/// Delete a job on the backend
pub async fn delete_job(ctx: &AppContext, id: i64) -> Result<()> {
    execute_command("jobs::delete_job", || async {
        ctx.require_session()?;
        Ok(ctx.api.delete_job(id).await?)
    })
    .await
}
