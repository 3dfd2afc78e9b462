//! Storage backends implemented on the infrastructure side

pub mod file;

pub use file::FileStorage;
