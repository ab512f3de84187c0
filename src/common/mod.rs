//! Common types and utilities: the detection pipeline and its error type.

// Submodule declarations
pub mod detection;
pub mod error;

// Re-exports for convenience
pub use detection::{DetectionResult, FileType, detect_file_type, detect_file_type_from_bytes};
pub use error::{Error, Result};
