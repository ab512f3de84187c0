//! Error types for blob-sniffer.
//!
//! Detection has a deliberately small failure surface: a source whose bytes
//! cannot be obtained, or a detector built from an unusable configuration.
//! Malformed content is never an error; it degrades to a less specific result.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
