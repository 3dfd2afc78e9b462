//! Job postings and job-description extraction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Company a job belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    /// Server id
    pub id: i64,
    /// Display name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Company site
    pub website: Option<String>,
}

/// Structured job description
///
/// Returned by `POST /jobs/extract/` and stored on a job as `jd_struct`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescription {
    /// Job title
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Company name
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    /// Location
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    /// Seniority level
    #[serde(deserialize_with = "null_as_default")]
    pub seniority: String,
    /// Skills mentioned
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    /// Hard requirements
    #[serde(deserialize_with = "null_as_default")]
    pub must_haves: Vec<String>,
    /// Optional requirements
    #[serde(deserialize_with = "null_as_default")]
    pub nice_to_haves: Vec<String>,
    /// Short summary
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
}

/// Saved job posting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    /// Server id
    pub id: i64,
    /// Company, when one is attached
    pub company: Option<Company>,
    /// Job title
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Location
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    /// Seniority level
    #[serde(deserialize_with = "null_as_default")]
    pub seniority: String,
    /// Posting link
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// Raw job description
    #[serde(deserialize_with = "null_as_default")]
    pub jd_raw: String,
    /// Structured job description
    #[serde(deserialize_with = "null_as_default")]
    pub jd_struct: JobDescription,
    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Company name, or an empty string when the job has none attached
    pub fn company_name(&self) -> &str {
        self.company.as_ref().map_or("", |company| company.name.as_str())
    }
}

/// Body of `POST /jobs/`
///
/// The backend needs either `company_id` or `company_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewJob {
    /// Existing company id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    /// Company name to find or create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Job title
    pub title: String,
    /// Location
    pub location: String,
    /// Seniority level
    pub seniority: String,
    /// Posting link
    pub url: String,
    /// Raw job description
    pub jd_raw: String,
    /// Structured job description
    pub jd_struct: JobDescription,
}

/// Body of `POST /jobs/extract/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractRequest {
    /// Posting link
    pub url: String,
    /// Pasted description text
    pub jd_text: String,
}

/// Response of `GET /health/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    /// Backend is up
    pub ok: bool,
    /// Server time
    pub time: Option<String>,
}
