//! # recipebox_core
//!
//! Core domain logic for Recipebox: record types, flat-file JSON stores and
//! the chat-completion client used for recipe generation.

pub mod completion;
pub mod ids;
pub mod models;
pub mod storage;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
