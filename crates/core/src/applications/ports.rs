//! Port interfaces for application tracking
//!
//! These traits define the boundary between the board logic and the
//! backend client that persists stage changes.

use applymate_domain::{Application, Result, Stage};
use async_trait::async_trait;

/// Backend operations the stage board depends on
#[async_trait]
pub trait ApplicationGateway: Send + Sync {
    /// List applications, optionally restricted to one job
    async fn list_applications(&self, job_id: Option<i64>) -> Result<Vec<Application>>;

    /// Persist a stage change and return the server's copy of the record
    async fn update_stage(&self, id: i64, stage: Stage) -> Result<Application>;
}
