//! File type detection.
//!
//! Detection is based on file signatures (magic numbers), reading only the
//! few bytes each signature occupies. ZIP archives are the exception: the
//! whole source is loaded and its local file headers are walked to tell
//! OOXML, OpenDocument, EPUB, XPI and 3MF containers apart from plain ZIP.

// Submodule declarations
#[cfg(feature = "async")]
pub mod asynchronous;
pub mod config;
pub mod functions;
pub mod matcher;
pub mod signatures;
pub mod source;
pub mod tokenizer;
pub mod types;
pub mod zip;

// Re-exports
#[cfg(feature = "async")]
pub use asynchronous::{detect_file_type_async, detect_file_type_from_path_async};
pub use config::DetectorConfig;
pub use functions::{
    Detector, detect_file_type, detect_file_type_from_bytes, detect_file_type_from_path,
    detect_file_type_from_reader,
};
pub use matcher::{detect_simple, match_signature};
pub use signatures::{SIGNATURES, Signature};
pub use source::{ByteSource, ReaderSource, StreamSource, Window};
pub use types::{DetectionResult, FileType};
