//! Domain types and models
//!
//! Wire shapes of the ApplyMate backend. The backend owns these records; the
//! client only decodes them defensively, so every optional field and every
//! list defaults when absent.

pub mod applications;
pub mod auth;
pub mod documents;
pub mod jobs;
pub mod resumes;

pub use applications::{Application, ApplicationUpdate, NewApplication, Stage, StageCount};
pub use auth::{
    LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest, RegisteredUser, TokenPair,
};
pub use documents::{DocumentKind, FitRequest, FitResult, GenerateDocumentRequest, GeneratedDocument};
pub use jobs::{Company, ExtractRequest, HealthStatus, Job, JobDescription, NewJob};
pub use resumes::Resume;

/// Serde helper: treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;

    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
