//! # ApplyMate Domain
//!
//! Business domain types and models for the ApplyMate client.
//!
//! This crate contains:
//! - Wire types for the ApplyMate backend (jobs, applications, resumes, ...)
//! - The fixed application pipeline ([`Stage`])
//! - Domain error types and Result definitions
//! - Configuration structures and domain constants
//!
//! ## Architecture
//! - No dependencies on other ApplyMate crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
