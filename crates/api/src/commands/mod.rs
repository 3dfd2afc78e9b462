//! Commands - view-facing operations
//!
//! Every command takes the [`AppContext`](crate::AppContext), logs its outcome
//! and returns `applymate_domain::Result`.

mod auth;
mod board;
mod documents;
mod health;
mod jobs;
mod resumes;

pub use auth::*;
pub use board::*;
pub use documents::*;
pub use health::*;
pub use jobs::*;
pub use resumes::*;
