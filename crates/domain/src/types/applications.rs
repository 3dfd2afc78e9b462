//! Applications and the fixed stage pipeline

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::errors::ApplyMateError;

/// One node of the application pipeline
///
/// Ordered: saved → applied → oa → interview → offer → rejected.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Tracked but not applied yet
    #[default]
    Saved,
    /// Application sent
    Applied,
    /// Online assessment
    Oa,
    /// Interviewing
    Interview,
    /// Offer received
    Offer,
    /// Closed without an offer
    Rejected,
}

impl Stage {
    /// Every stage in pipeline order
    pub const ALL: [Stage; 6] =
        [Self::Saved, Self::Applied, Self::Oa, Self::Interview, Self::Offer, Self::Rejected];

    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Applied => "applied",
            Self::Oa => "oa",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable label for board columns
    pub fn label(self) -> &'static str {
        match self {
            Self::Saved => "Saved",
            Self::Applied => "Applied",
            Self::Oa => "OA",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ApplyMateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ApplyMateError::InvalidInput(format!("unknown stage '{value}'")))
    }
}

/// Tracked application for a job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    /// Server id
    pub id: i64,
    /// Id of the job this application belongs to
    pub job: i64,
    /// Current pipeline stage
    pub stage: Stage,
    /// Date the application was sent
    pub applied_at: Option<NaiveDate>,
    /// Next step to take
    #[serde(deserialize_with = "null_as_default")]
    pub next_action: String,
    /// Due date of the next step
    pub next_action_due: Option<NaiveDate>,
    /// Free-form notes
    #[serde(deserialize_with = "null_as_default")]
    pub notes: String,
}

/// Body of `POST /apps/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewApplication {
    /// Job to track
    pub job: i64,
    /// Initial stage
    pub stage: Stage,
}

impl NewApplication {
    /// Track `job` in the saved stage
    pub fn saved(job: i64) -> Self {
        Self { job, stage: Stage::Saved }
    }
}

/// Partial update for `PATCH /apps/{id}/`; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationUpdate {
    /// New stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    /// New application date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<NaiveDate>,
    /// New next step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action: Option<String>,
    /// New next step due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action_due: Option<NaiveDate>,
    /// New notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ApplicationUpdate {
    /// Update that only moves the stage
    pub fn stage(stage: Stage) -> Self {
        Self { stage: Some(stage), ..Self::default() }
    }
}

/// Number of applications sitting in one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageCount {
    /// Stage counted
    pub stage: Stage,
    /// Applications in it
    pub count: usize,
}
