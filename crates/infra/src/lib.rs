//! # ApplyMate Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client and the backend request layer (dispatch, token refresh)
//! - The typed backend operation catalogue
//! - File-backed session storage and session construction
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `applymate-core`
//! - Depends on `applymate-common` and `applymate-domain`
//! - Contains all "impure" code (network, file system, keychain)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod session;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientConfig, ApiCommands, ApiError, RequestDescriptor};
pub use errors::InfraError;
pub use http::HttpClient;
pub use session::open_token_store;
pub use storage::FileStorage;
