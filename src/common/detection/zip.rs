//! ZIP container classification by walking local file headers.
//!
//! OOXML, OpenDocument, EPUB, XPI and 3MF files all start with the ZIP
//! local file header magic. Telling them apart only needs entry names and,
//! for ODF/EPUB, the stored `mimetype` entry, so the walker reads headers
//! front to back and skips every payload without decompressing it. The
//! central directory is never consulted.

use std::borrow::Cow;

use memchr::memmem;
use tracing::{debug, trace};
use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use super::signatures::ZIP_SIGNATURE;
use super::tokenizer::{EndOfStream, StreamSize, Tokenizer};
use super::types::FileType;

/// Length of the fixed part of a local file header.
pub const LOCAL_FILE_HEADER_LEN: usize = 30;

/// Default size of the scratch buffer used when peeking ahead.
pub const DEFAULT_SCAN_WINDOW: usize = 4100;

/// On-disk layout of the fixed part of a local file header.
///
/// Only the sizes and variable-length field lengths are read; the rest is
/// kept to pin the layout.
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
struct RawLocalFileHeader {
    _signature: U32,
    _version_needed: U16,
    _flags: U16,
    _compression_method: U16,
    _last_mod_time: U16,
    _last_mod_date: U16,
    _crc32: U32,
    compressed_size: U32,
    uncompressed_size: U32,
    file_name_length: U16,
    extra_field_length: U16,
}

const _: () = assert!(std::mem::size_of::<RawLocalFileHeader>() == LOCAL_FILE_HEADER_LEN);

/// One local file header, as far as classification needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileHeader<'a> {
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub filename_length: u16,
    pub extra_field_length: u16,
    pub filename: Cow<'a, str>,
}

impl<'a> LocalFileHeader<'a> {
    /// Read a header at the cursor and step past its filename and extra field.
    pub fn read(tokenizer: &mut Tokenizer<'a>) -> Result<Self, EndOfStream> {
        let bytes = tokenizer.read_bytes(LOCAL_FILE_HEADER_LEN)?;
        let raw = RawLocalFileHeader::read_from_bytes(bytes).map_err(|_| EndOfStream {
            requested: LOCAL_FILE_HEADER_LEN as u64,
            available: bytes.len() as u64,
        })?;

        let filename_length = raw.file_name_length.get();
        let extra_field_length = raw.extra_field_length.get();
        let filename = tokenizer.read_string(filename_length as usize)?;
        tokenizer.ignore(u64::from(extra_field_length));

        Ok(Self {
            compressed_size: raw.compressed_size.get(),
            uncompressed_size: raw.uncompressed_size.get(),
            filename_length,
            extra_field_length,
            filename,
        })
    }

    /// Stored entries keep their size through compression.
    #[inline]
    pub fn is_stored(&self) -> bool {
        self.compressed_size == self.uncompressed_size
    }
}

/// Classify an entry by its name alone.
pub fn classify_entry_name(filename: &str) -> Option<FileType> {
    if filename == "META-INF/mozilla.rsa" {
        return Some(FileType::Xpi);
    }

    if filename.ends_with(".rels") || filename.ends_with(".xml") {
        match filename.split('/').next() {
            Some("word") => return Some(FileType::Docx),
            Some("ppt") => return Some(FileType::Pptx),
            Some("xl") => return Some(FileType::Xlsx),
            // `_rels` and anything else say nothing yet
            _ => {},
        }
    }

    if filename.starts_with("xl/") {
        return Some(FileType::Xlsx);
    }

    if filename.starts_with("3D/") && filename.ends_with(".model") {
        return Some(FileType::ThreeMf);
    }

    None
}

/// Classify the content of a stored `mimetype` entry.
pub fn classify_mimetype(content: &str) -> Option<FileType> {
    match content.trim() {
        "application/epub+zip" => Some(FileType::Epub),
        "application/vnd.oasis.opendocument.text" => Some(FileType::Odt),
        "application/vnd.oasis.opendocument.spreadsheet" => Some(FileType::Ods),
        "application/vnd.oasis.opendocument.presentation" => Some(FileType::Odp),
        _ => None,
    }
}

/// Walks the local file headers of one archive.
///
/// All state lives in the walker and is dropped with it.
pub struct ZipWalker<'a> {
    tokenizer: Tokenizer<'a>,
    scratch: Vec<u8>,
    finder: memmem::Finder<'static>,
}

impl<'a> ZipWalker<'a> {
    /// `scan_window` must be at least the length of the header signature.
    pub fn new(data: &'a [u8], size: StreamSize, scan_window: usize) -> Self {
        Self {
            tokenizer: Tokenizer::new(data, size),
            scratch: vec![0u8; scan_window.max(ZIP_SIGNATURE.len())],
            finder: memmem::Finder::new(ZIP_SIGNATURE),
        }
    }

    /// Classify the archive, falling back to plain ZIP.
    pub fn classify(mut self) -> FileType {
        match self.walk() {
            Ok(Some(file_type)) => {
                debug!(
                    file_type = %file_type,
                    position = self.tokenizer.position(),
                    "classified zip container"
                );
                file_type
            },
            Ok(None) => FileType::Zip,
            Err(eos) => {
                debug!(
                    position = self.tokenizer.position(),
                    "zip walk stopped: {}", eos
                );
                FileType::Zip
            },
        }
    }

    fn walk(&mut self) -> Result<Option<FileType>, EndOfStream> {
        let warmed = self.tokenizer.peek(&mut self.scratch);
        trace!(warmed, "peeked archive head");

        while self
            .tokenizer
            .cursor()
            .size
            .exceeds(self.tokenizer.position() + LOCAL_FILE_HEADER_LEN as u64)
        {
            let header = LocalFileHeader::read(&mut self.tokenizer)?;
            trace!(
                filename = %header.filename,
                compressed_size = header.compressed_size,
                uncompressed_size = header.uncompressed_size,
                position = self.tokenizer.position(),
                "local file header"
            );

            if let Some(file_type) = classify_entry_name(&header.filename) {
                return Ok(Some(file_type));
            }

            if header.filename == "mimetype" && header.is_stored() {
                let content = self
                    .tokenizer
                    .read_string(header.compressed_size as usize)?;
                if let Some(file_type) = classify_mimetype(&content) {
                    return Ok(Some(file_type));
                }
            }

            // The payload skip is unconditional, even after an unrecognized
            // `mimetype` body was already read
            if header.compressed_size == 0 {
                self.resynchronize();
            } else {
                self.tokenizer.ignore(u64::from(header.compressed_size));
            }
        }

        Ok(None)
    }

    /// Move the cursor to the next local file header signature.
    ///
    /// Used for entries whose size only appears in a trailing data
    /// descriptor. Windows without a match are skipped whole, so a
    /// signature straddling two windows is not found. Stops at the end of
    /// the buffer if no signature follows.
    fn resynchronize(&mut self) {
        while self
            .tokenizer
            .cursor()
            .size
            .exceeds(self.tokenizer.position())
        {
            let peeked = self.tokenizer.peek(&mut self.scratch);
            if peeked == 0 {
                break;
            }

            if let Some(offset) = self.finder.find(&self.scratch[..peeked]) {
                self.tokenizer.ignore(offset as u64);
                trace!(position = self.tokenizer.position(), "resynchronized");
                return;
            }

            self.tokenizer.ignore(peeked as u64);
        }
        trace!(position = self.tokenizer.position(), "no further header");
    }
}

/// Classify a ZIP archive held in `data`.
pub fn classify_zip(data: &[u8], size: StreamSize, scan_window: usize) -> FileType {
    ZipWalker::new(data, size, scan_window).classify()
}
