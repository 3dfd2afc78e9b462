//! # ApplyMate Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) implemented by the infra layer
//! - The optimistic application stage board
//! - Shaping of extracted job descriptions into saveable jobs
//!
//! ## Architecture Principles
//! - Only depends on `applymate-domain`
//! - No HTTP, storage, or platform code
//! - All external dependencies via traits

pub mod applications;
pub mod jobs;

pub use applications::board::StageBoard;
pub use applications::ports::ApplicationGateway;
pub use jobs::draft::JobDraft;
