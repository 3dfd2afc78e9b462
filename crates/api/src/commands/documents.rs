//! Fit scoring and document generation commands

use applymate_domain::{
    DocumentKind, FitRequest, FitResult, GenerateDocumentRequest, GeneratedDocument, Result,
};
use tracing::debug;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Score how well a resume fits a job
pub async fn score_fit(ctx: &AppContext, job_id: i64, resume_id: i64) -> Result<FitResult> {
    execute_command("documents::score_fit", || async {
        ctx.require_session()?;
        let fit = ctx.api.score_fit(&FitRequest { job_id, resume_id }).await?;
        debug!(job_id, resume_id, score = fit.score, "Fit scored");
        Ok(fit)
    })
    .await
}

/// Generate a document of `kind` for a job
///
/// With `export` set the backend also renders a `.docx` and returns its URL.
pub async fn generate_document(
    ctx: &AppContext,
    job_id: i64,
    resume_id: Option<i64>,
    kind: DocumentKind,
    export: bool,
) -> Result<GeneratedDocument> {
    execute_command("documents::generate_document", || async {
        ctx.require_session()?;
        let request = GenerateDocumentRequest { job_id, resume_id, kind, export };
        Ok(ctx.api.generate_document(&request).await?)
    })
    .await
}
