//! Application tracking: stage board and its backend port

pub mod board;
pub mod ports;
