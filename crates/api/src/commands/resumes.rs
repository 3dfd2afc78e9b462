//! Resume commands

use std::path::Path;

use applymate_domain::constants::DEFAULT_RESUME_LABEL;
use applymate_domain::{ApplyMateError, Resume, Result};
use applymate_infra::InfraError;
use tracing::info;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Upload the resume file at `path`
///
/// A blank or missing `label` falls back to the default resume label.
///
/// # Errors
/// - `ApplyMateError::InvalidInput` when `path` has no file name
/// - `ApplyMateError::NotFound` / `Storage` when the file cannot be read
/// - the backend error otherwise
pub async fn upload_resume(ctx: &AppContext, path: &Path, label: Option<&str>) -> Result<Resume> {
    execute_command("resumes::upload_resume", || async {
        ctx.require_session()?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ApplyMateError::InvalidInput(format!("not a file path: {}", path.display()))
            })?
            .to_string();
        let label = label.map(str::trim).filter(|l| !l.is_empty()).unwrap_or(DEFAULT_RESUME_LABEL);

        let bytes = tokio::fs::read(path).await.map_err(InfraError::from)?;
        let resume = ctx.api.upload_resume(label, &file_name, bytes).await?;
        info!(resume_id = resume.id, label, "Resume uploaded");
        Ok(resume)
    })
    .await
}

/// List the user's uploaded resumes
pub async fn list_resumes(ctx: &AppContext) -> Result<Vec<Resume>> {
    execute_command("resumes::list_resumes", || async {
        ctx.require_session()?;
        Ok(ctx.api.list_resumes().await?)
    })
    .await
}
