//! # ApplyMate App
//!
//! Application layer - commands and session wiring.
//!
//! This crate contains:
//! - Commands (view-facing operations over the backend API)
//! - Application context (dependency injection)
//! - Tracing setup and command logging helpers
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Owns the session: one [`AppContext`] per signed-in user

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
