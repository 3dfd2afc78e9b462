//! Fit scoring and generated documents

use std::fmt;

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Body of `POST /fit/score/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FitRequest {
    /// Job to score against
    pub job_id: i64,
    /// Resume to score
    pub resume_id: i64,
}

/// Resume-to-job fit as scored by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitResult {
    /// Fit score out of 100
    pub score: u32,
    /// Requirements the resume meets
    #[serde(rename = "match", deserialize_with = "null_as_default")]
    pub matched: Vec<String>,
    /// Requirements the resume misses
    #[serde(deserialize_with = "null_as_default")]
    pub gaps: Vec<String>,
    /// Suggested improvements
    #[serde(deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
    /// Free-form advice; shape depends on the backend's AI provider
    pub advice: serde_json::Value,
}

/// Kind of document the backend can generate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Achievement bullets
    #[default]
    Bullets,
    /// Cover letter
    #[serde(rename = "coverletter")]
    CoverLetter,
    /// Tailored resume
    Resume,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bullets => "bullets",
            Self::CoverLetter => "coverletter",
            Self::Resume => "resume",
        })
    }
}

/// Body of `POST /docs/generate/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerateDocumentRequest {
    /// Job the document targets
    pub job_id: i64,
    /// Resume to draw from; the backend picks one when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<i64>,
    /// Kind of document
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    /// Ask the backend to also export a `.docx` file
    pub export: bool,
}

/// Generated document; `file_url` is set when an export was requested
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedDocument {
    /// Server id when the document was saved
    pub id: Option<i64>,
    /// Kind of document
    pub kind: DocumentKind,
    /// Document body as Markdown
    #[serde(deserialize_with = "null_as_default")]
    pub content_md: String,
    /// Storage path of the export
    pub file: Option<String>,
    /// Download URL of the export
    pub file_url: Option<String>,
}
