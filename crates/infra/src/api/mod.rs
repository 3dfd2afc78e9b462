//! Backend API client for ApplyMate
//!
//! This module provides the HTTP request layer for the ApplyMate REST+JWT
//! backend: request descriptors, the dispatcher, token refresh, and the
//! typed operation catalogue.
//!
//! # Architecture
//!
//! - Uses the shared [`HttpClient`](crate::http::HttpClient) (no direct reqwest clients)
//! - Session tokens come from an explicit `TokenStore`
//! - An "invalid token" 401 triggers one refresh exchange and a single retry
//! - Refresh exchanges are serialized per session
//! - Timeout on every external call

pub mod client;
pub mod commands;
pub mod errors;
pub mod refresh;
pub mod request;

pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig, BaseUrls};
pub use commands::ApiCommands;
pub use errors::{ApiError, ApiErrorCategory};
pub use refresh::RefreshCoordinator;
pub use request::{MultipartUpload, RequestBody, RequestDescriptor, Target};
