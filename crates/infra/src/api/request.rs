//! Request descriptors
//!
//! A [`RequestDescriptor`] describes one backend call independently of the
//! transport, so the dispatcher can issue it a second time after a token
//! refresh.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::errors::ApiError;

/// Which base URL a path is resolved against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Target {
    /// Configured API base, e.g. `http://host/api`
    #[default]
    Api,
    /// Host root; the path is resolved as `<root>/api<path>`
    Root,
}

/// Request payload
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON body
    Json(Value),
    /// `multipart/form-data` body
    Multipart(MultipartUpload),
}

/// Multipart form held as owned data so it can be rebuilt for a retry
#[derive(Debug, Clone, Default)]
pub struct MultipartUpload {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

#[derive(Debug, Clone)]
struct FilePart {
    name: String,
    file_name: String,
    bytes: Vec<u8>,
}

impl MultipartUpload {
    /// Empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Add a file field with its bytes
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.files.push(FilePart { name: name.into(), file_name: file_name.into(), bytes });
        self
    }

    /// Build a fresh reqwest form; called once per attempt
    pub(crate) fn to_form(&self) -> Form {
        let form = self
            .fields
            .iter()
            .fold(Form::new(), |form, (name, value)| form.text(name.clone(), value.clone()));

        self.files.iter().fold(form, |form, file| {
            let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
            form.part(file.name.clone(), part)
        })
    }
}

/// One backend call: method, path, headers, body, and whether it needs the
/// session token
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: Method,
    /// Path relative to the target base
    pub path: String,
    /// Extra headers; `Authorization` is always replaced
    pub headers: HeaderMap,
    /// Payload
    pub body: RequestBody,
    /// Attach the session token
    pub auth: bool,
    /// Base the path is resolved against
    pub target: Target,
}

impl RequestDescriptor {
    /// Authenticated request against the API base with no body
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            auth: true,
            target: Target::Api,
        }
    }

    /// Authenticated `GET`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Authenticated `POST`
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Authenticated `PATCH`
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Authenticated `DELETE`
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Send without the session token
    pub fn public(mut self) -> Self {
        self.auth = false;
        self
    }

    /// Resolve the path against the host root instead of the API base
    pub fn at_root(mut self) -> Self {
        self.target = Target::Root;
        self
    }

    /// Add a header
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Serialize `body` as the JSON payload
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the value cannot be serialized
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::Config(format!("Failed to serialize body: {e}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Send `upload` as a multipart form
    pub fn multipart(mut self, upload: MultipartUpload) -> Self {
        self.body = RequestBody::Multipart(upload);
        self
    }
}
