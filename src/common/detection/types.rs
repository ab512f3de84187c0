//! File type enumeration and the detection result record.

use phf::phf_map;
use serde::Serialize;
use std::fmt;

/// File types the sniffer can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Portable Network Graphics (.png)
    Png,
    /// JPEG image (.jpg)
    Jpg,
    /// WebP image (.webp)
    Webp,
    /// Windows bitmap (.bmp)
    Bmp,
    /// Graphics Interchange Format (.gif)
    Gif,
    /// Portable Document Format (.pdf)
    Pdf,
    /// Windows icon (.ico)
    Ico,
    /// DOS/Windows executable (.exe)
    Exe,
    /// Scream Tracker 3 module (.s3m)
    S3m,
    /// ESRI shapefile (.shp)
    Shp,
    /// Mozilla browser extension (.xpi)
    Xpi,
    /// Microsoft Word Document (OOXML format, .docx)
    Docx,
    /// Microsoft PowerPoint Presentation (OOXML format, .pptx)
    Pptx,
    /// Microsoft Excel Spreadsheet (OOXML format, .xlsx)
    Xlsx,
    /// 3D Manufacturing Format (.3mf)
    ThreeMf,
    /// Electronic publication (.epub)
    Epub,
    /// OpenDocument Text (.odt)
    Odt,
    /// OpenDocument Spreadsheet (.ods)
    Ods,
    /// OpenDocument Presentation (.odp)
    Odp,
    /// Plain ZIP archive (.zip)
    Zip,
    /// No signature matched
    Unknown,
}

static BY_EXTENSION: phf::Map<&'static str, FileType> = phf_map! {
    "png" => FileType::Png,
    "jpg" => FileType::Jpg,
    "webp" => FileType::Webp,
    "bmp" => FileType::Bmp,
    "gif" => FileType::Gif,
    "pdf" => FileType::Pdf,
    "ico" => FileType::Ico,
    "exe" => FileType::Exe,
    "s3m" => FileType::S3m,
    "shp" => FileType::Shp,
    "xpi" => FileType::Xpi,
    "docx" => FileType::Docx,
    "pptx" => FileType::Pptx,
    "xlsx" => FileType::Xlsx,
    "3mf" => FileType::ThreeMf,
    "epub" => FileType::Epub,
    "odt" => FileType::Odt,
    "ods" => FileType::Ods,
    "odp" => FileType::Odp,
    "zip" => FileType::Zip,
    "unknown" => FileType::Unknown,
};

impl FileType {
    /// Every reportable file type, `Unknown` last.
    pub const ALL: [FileType; 21] = [
        FileType::Png,
        FileType::Jpg,
        FileType::Webp,
        FileType::Bmp,
        FileType::Gif,
        FileType::Pdf,
        FileType::Ico,
        FileType::Exe,
        FileType::S3m,
        FileType::Shp,
        FileType::Xpi,
        FileType::Docx,
        FileType::Pptx,
        FileType::Xlsx,
        FileType::ThreeMf,
        FileType::Epub,
        FileType::Odt,
        FileType::Ods,
        FileType::Odp,
        FileType::Zip,
        FileType::Unknown,
    ];

    /// Canonical file extension, without the leading dot.
    pub const fn extension(self) -> &'static str {
        match self {
            FileType::Png => "png",
            FileType::Jpg => "jpg",
            FileType::Webp => "webp",
            FileType::Bmp => "bmp",
            FileType::Gif => "gif",
            FileType::Pdf => "pdf",
            FileType::Ico => "ico",
            FileType::Exe => "exe",
            FileType::S3m => "s3m",
            FileType::Shp => "shp",
            FileType::Xpi => "xpi",
            FileType::Docx => "docx",
            FileType::Pptx => "pptx",
            FileType::Xlsx => "xlsx",
            FileType::ThreeMf => "3mf",
            FileType::Epub => "epub",
            FileType::Odt => "odt",
            FileType::Ods => "ods",
            FileType::Odp => "odp",
            FileType::Zip => "zip",
            FileType::Unknown => "unknown",
        }
    }

    /// MIME type reported for this file type.
    pub const fn mime_type(self) -> &'static str {
        match self {
            FileType::Png => "image/png",
            FileType::Jpg => "image/jpeg",
            FileType::Webp => "image/webp",
            FileType::Bmp => "image/bmp",
            FileType::Gif => "image/gif",
            FileType::Pdf => "application/pdf",
            FileType::Ico => "image/x-icon",
            FileType::Exe => "application/x-msdownload",
            FileType::S3m => "audio/x-s3m",
            FileType::Shp => "application/x-esri-shape",
            FileType::Xpi => "application/x-xpinstall",
            FileType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            },
            FileType::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            },
            FileType::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            FileType::ThreeMf => "model/3mf",
            FileType::Epub => "application/epub+zip",
            FileType::Odt => "application/vnd.oasis.opendocument.text",
            FileType::Ods => "application/vnd.oasis.opendocument.spreadsheet",
            FileType::Odp => "application/vnd.oasis.opendocument.presentation",
            FileType::Zip => "application/zip",
            FileType::Unknown => "unknown",
        }
    }

    /// Look up a file type by its canonical extension.
    #[inline]
    pub fn from_extension(ext: &str) -> Option<FileType> {
        BY_EXTENSION.get(ext).copied()
    }

    /// Office documents: OOXML and OpenDocument.
    pub const fn is_office_document(self) -> bool {
        matches!(
            self,
            FileType::Docx
                | FileType::Pptx
                | FileType::Xlsx
                | FileType::Odt
                | FileType::Ods
                | FileType::Odp
        )
    }

    /// Formats that are ZIP archives underneath.
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            FileType::Xpi
                | FileType::Docx
                | FileType::Pptx
                | FileType::Xlsx
                | FileType::ThreeMf
                | FileType::Epub
                | FileType::Odt
                | FileType::Ods
                | FileType::Odp
                | FileType::Zip
        )
    }

    /// The detection result carrying this type's extension and MIME type.
    #[inline]
    pub const fn result(self) -> DetectionResult {
        DetectionResult {
            extension: self.extension(),
            mime: self.mime_type(),
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Outcome of one detection call.
///
/// Exactly one is produced per call. `{"unknown", "unknown"}` means no
/// signature matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DetectionResult {
    /// File extension, without the leading dot
    #[serde(rename = "ext")]
    pub extension: &'static str,
    /// MIME type
    pub mime: &'static str,
}

impl DetectionResult {
    /// Sentinel for "no signature matched".
    pub const UNKNOWN: DetectionResult = FileType::Unknown.result();

    /// Whether this is the [`DetectionResult::UNKNOWN`] sentinel.
    #[inline]
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }

    /// The file type this result was built from.
    pub fn file_type(&self) -> FileType {
        FileType::from_extension(self.extension).unwrap_or(FileType::Unknown)
    }
}

impl Default for DetectionResult {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl From<FileType> for DetectionResult {
    fn from(file_type: FileType) -> Self {
        file_type.result()
    }
}

impl fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.extension, self.mime)
    }
}
