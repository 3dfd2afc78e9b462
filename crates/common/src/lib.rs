//! Common utilities shared across ApplyMate crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - default: session storage primitives and the token store
//! - `platform`: OS keychain storage backend
//! - `test-utils`: storage mocks for downstream test suites

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "platform")]
pub use auth::KeychainStorage;
pub use auth::{KeyValueStorage, MemoryStorage, StorageError, TokenStore};
