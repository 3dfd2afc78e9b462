//! Conversions from external infrastructure errors into domain errors.

use std::io::Error as IoError;

use applymate_common::auth::StorageError;
use applymate_domain::ApplyMateError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ApplyMateError);

impl From<InfraError> for ApplyMateError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ApplyMateError> for InfraError {
    fn from(value: ApplyMateError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoApplyMateError {
    fn into_applymate(self) -> ApplyMateError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApplyMateError */
/* -------------------------------------------------------------------------- */

impl IntoApplyMateError for HttpError {
    fn into_applymate(self) -> ApplyMateError {
        if self.is_timeout() {
            return ApplyMateError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return ApplyMateError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return ApplyMateError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            return ApplyMateError::Http {
                status: status.as_u16(),
                detail: status.canonical_reason().unwrap_or("unknown status").to_string(),
            };
        }

        ApplyMateError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_applymate())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → ApplyMateError */
/* -------------------------------------------------------------------------- */

impl IntoApplyMateError for JsonError {
    fn into_applymate(self) -> ApplyMateError {
        if self.is_io() {
            return ApplyMateError::Storage(format!("JSON I/O failure: {self}"));
        }
        ApplyMateError::InvalidInput(format!("malformed JSON at line {}: {self}", self.line()))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_applymate())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → ApplyMateError */
/* -------------------------------------------------------------------------- */

impl IntoApplyMateError for IoError {
    fn into_applymate(self) -> ApplyMateError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::NotFound => ApplyMateError::NotFound(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => {
                ApplyMateError::Storage(format!("permission denied: {self}"))
            }
            _ => ApplyMateError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_applymate())
    }
}

/* -------------------------------------------------------------------------- */
/* StorageError → ApplyMateError */
/* -------------------------------------------------------------------------- */

impl IntoApplyMateError for StorageError {
    fn into_applymate(self) -> ApplyMateError {
        ApplyMateError::Storage(self.to_string())
    }
}

impl From<StorageError> for InfraError {
    fn from(value: StorageError) -> Self {
        InfraError(value.into_applymate())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
