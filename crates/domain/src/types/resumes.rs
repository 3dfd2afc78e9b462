//! Uploaded resumes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Resume uploaded by the user; `file` is the storage path or URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    /// Server id
    pub id: i64,
    /// Display label
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    /// Storage path or URL
    #[serde(deserialize_with = "null_as_default")]
    pub file: String,
    /// Text extracted from the file
    #[serde(deserialize_with = "null_as_default")]
    pub parsed_text: String,
    /// Upload time
    pub created_at: Option<DateTime<Utc>>,
}
