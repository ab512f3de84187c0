//! Core file type detection functions.
//!
//! Magic numbers are checked first, in table order, each with a bounded
//! read. Only a ZIP match loads the whole source, which is then handed to
//! the ZIP walker.

use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use super::config::DetectorConfig;
use super::matcher::match_signature;
use super::source::{ByteSource, ReaderSource};
use super::tokenizer::StreamSize;
use super::types::{DetectionResult, FileType};
use super::zip::classify_zip;
use crate::common::error::Result;

/// Reusable file type detector.
///
/// A detector holds only its configuration; every call owns its own
/// buffers and cursor, so one detector can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// Create a detector, validating the configuration.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration this detector runs with.
    #[inline]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detect the type of `source`.
    ///
    /// # Arguments
    ///
    /// * `source` - Any [`ByteSource`]; only signature windows are read
    ///   unless the ZIP magic matches
    ///
    /// # Returns
    ///
    /// * `Ok(DetectionResult)` for every readable source, with
    ///   [`DetectionResult::UNKNOWN`] when nothing matched
    /// * `Err(Error::Io)` when a read fails, including while loading a
    ///   matched ZIP archive
    pub fn detect<S: ByteSource>(&self, mut source: S) -> Result<DetectionResult> {
        match match_signature(&mut source)? {
            Some(signature) if signature.is_zip() => {
                Ok(self.classify_archive(&mut source)?.result())
            },
            Some(signature) => Ok(signature.result()),
            None => Ok(DetectionResult::UNKNOWN),
        }
    }

    /// Load the archive (bounded by `max_archive_bytes`) and walk its entries.
    fn classify_archive<S: ByteSource>(&self, source: &mut S) -> Result<FileType> {
        let size = source.size();
        let stream_size = self.archive_size(size);
        let data = match self.config.max_archive_bytes {
            Some(limit) => Cow::Owned(source.read_window(0, limit)?.into_vec()),
            None => source.read_all()?,
        };
        Ok(classify_zip(&data, stream_size, self.config.scan_window))
    }

    /// Cursor bound for an archive whose source reports `size`.
    pub(crate) fn archive_size(&self, size: Option<u64>) -> StreamSize {
        match (size, self.config.max_archive_bytes) {
            (Some(size), Some(limit)) => StreamSize::Known(size.min(limit)),
            (None, Some(limit)) => StreamSize::Known(limit),
            (size, None) => StreamSize::from(size),
        }
    }
}

/// Detect the file type of any [`ByteSource`] with the default configuration.
///
/// # Arguments
///
/// * `source` - In-memory bytes, a [`ReaderSource`] or a forward-only
///   [`StreamSource`](super::source::StreamSource)
///
/// # Returns
///
/// * `Ok(DetectionResult)` with the extension and MIME type, or
///   [`DetectionResult::UNKNOWN`]
/// * `Err(Error::Io)` if the source cannot be read
///
/// # Examples
///
/// ```rust
/// use blob_sniffer::detect_file_type;
///
/// let result = detect_file_type(&b"%PDF-1.7\n"[..])?;
/// assert_eq!(result.extension, "pdf");
/// assert_eq!(result.mime, "application/pdf");
/// # Ok::<(), blob_sniffer::Error>(())
/// ```
pub fn detect_file_type<S: ByteSource>(source: S) -> Result<DetectionResult> {
    Detector::default().detect(source)
}

/// Detect the file type of an in-memory buffer.
///
/// # Examples
///
/// ```rust
/// use blob_sniffer::detect_file_type_from_bytes;
///
/// assert_eq!(detect_file_type_from_bytes(b"GIF89a").extension, "gif");
/// assert!(detect_file_type_from_bytes(b"").is_unknown());
/// ```
pub fn detect_file_type_from_bytes(bytes: &[u8]) -> DetectionResult {
    // Slice reads cannot fail
    detect_file_type(bytes).unwrap_or_default()
}

/// Detect the file type of the file at `path`.
///
/// Only a few bytes are read unless the file is a ZIP archive.
///
/// ```rust,no_run
/// use blob_sniffer::detect_file_type_from_path;
///
/// let result = detect_file_type_from_path("report.docx")?;
/// println!("{result}");
/// # Ok::<(), blob_sniffer::Error>(())
/// ```
pub fn detect_file_type_from_path<P: AsRef<Path>>(path: P) -> Result<DetectionResult> {
    let file = File::open(path)?;
    detect_file_type_from_reader(file)
}

/// Detect the file type from any seekable reader.
///
/// The reader is measured by seeking to its end, then read in bounded
/// windows; the whole content is loaded only for ZIP archives.
///
/// # Arguments
///
/// * `reader` - Any `Read + Seek` value, such as a `File` or `io::Cursor`
///
/// # Returns
///
/// * `Ok(DetectionResult)` for the detected type, or
///   [`DetectionResult::UNKNOWN`]
/// * `Err(Error::Io)` if seeking or reading fails
///
/// # Examples
///
/// ```rust
/// use blob_sniffer::detect_file_type_from_reader;
/// use std::io::Cursor;
///
/// let result = detect_file_type_from_reader(Cursor::new(b"\xFF\xD8\xFF\xE0".to_vec()))?;
/// assert_eq!(result.mime, "image/jpeg");
/// # Ok::<(), blob_sniffer::Error>(())
/// ```
pub fn detect_file_type_from_reader<R: Read + Seek>(reader: R) -> Result<DetectionResult> {
    detect_file_type(ReaderSource::new(reader)?)
}
