//! Job intake helpers

pub mod draft;
