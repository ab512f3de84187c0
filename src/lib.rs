//! blob-sniffer - streaming file type detection for opaque byte sources
//!
//! Given a byte source that need not be loaded into memory, the sniffer
//! reports a file extension and MIME type by inspecting magic numbers. ZIP
//! archives are classified further by walking their local file headers, so
//! Office Open XML, OpenDocument, EPUB, browser extension and 3MF files are
//! told apart from plain ZIP without decompressing anything.
//!
//! # Features
//!
//! - **Bounded reads**: magic checks read only the bytes each signature covers
//! - **Container walking**: docx, xlsx, pptx, odt, ods, odp, epub, xpi, 3mf
//! - **Any source**: slices, `Vec<u8>`, `Bytes`, seekable readers, forward-only streams
//! - **Async**: tokio-based entry point behind the `async` feature
//!
//! # Example - Detecting a file on disk
//!
//! ```no_run
//! use blob_sniffer::detect_file_type_from_path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let result = detect_file_type_from_path("slides.pptx")?;
//! println!("{} ({})", result.extension, result.mime);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Detecting bytes in memory
//!
//! ```
//! use blob_sniffer::{FileType, detect_file_type_from_bytes};
//!
//! let result = detect_file_type_from_bytes(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR");
//! assert_eq!(result.file_type(), FileType::Png);
//! assert_eq!(result.mime, "image/png");
//!
//! assert!(detect_file_type_from_bytes(b"plain text").is_unknown());
//! ```
//!
//! # Example - Custom configuration
//!
//! ```
//! use blob_sniffer::{Detector, DetectorConfig};
//!
//! # fn main() -> Result<(), blob_sniffer::Error> {
//! let detector = Detector::new(DetectorConfig::default().with_max_archive_bytes(64 << 20))?;
//! let result = detector.detect(&b"PK\x03\x04"[..])?;
//! assert_eq!(result.extension, "zip");
//! # Ok(())
//! # }
//! ```

/// Shared types, error handling and the detection pipeline
pub mod common;

// Re-export commonly used types for convenience
pub use common::detection::{
    ByteSource, DetectionResult, Detector, DetectorConfig, FileType, ReaderSource, SIGNATURES,
    Signature, StreamSource, detect_file_type, detect_file_type_from_bytes,
    detect_file_type_from_path, detect_file_type_from_reader, detect_simple,
};
#[cfg(feature = "async")]
pub use common::detection::{detect_file_type_async, detect_file_type_from_path_async};
pub use common::error::{Error, Result};
