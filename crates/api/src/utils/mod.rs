//! Shared helpers for commands

pub mod command_helpers;
pub mod logging;
