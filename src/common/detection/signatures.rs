//! Magic number table.
//!
//! The order of [`SIGNATURES`] is the detection priority: the first entry
//! whose pattern matches wins, regardless of pattern length.

use super::types::{DetectionResult, FileType};

// Magic number signatures
pub const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
pub const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];
pub const WEBP_SIGNATURE: &[u8] = b"WEBP";
pub const BMP_SIGNATURE: &[u8] = &[0x42, 0x4D];
pub const GIF_SIGNATURE: &[u8] = &[0x47, 0x49, 0x46];
pub const PDF_SIGNATURE: &[u8] = b"%PDF";
pub const ICO_SIGNATURE: &[u8] = &[0x00, 0x00, 0x01, 0x00];
pub const ZIP_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
pub const EXE_SIGNATURE: &[u8] = &[0x4D, 0x5A];
pub const S3M_SIGNATURE: &[u8] = b"SCRM";
pub const SHP_SIGNATURE: &[u8] = &[
    0x27, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// A byte pattern expected at a fixed offset from the start of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Exact bytes to compare, no wildcards
    pub pattern: &'static [u8],
    /// Zero-based offset of the pattern in the source
    pub offset: u64,
    /// Type reported when the pattern matches
    pub file_type: FileType,
}

impl Signature {
    const fn new(pattern: &'static [u8], offset: u64, file_type: FileType) -> Self {
        Self {
            pattern,
            offset,
            file_type,
        }
    }

    /// Byte range `[offset, offset + len)` the pattern occupies.
    #[inline]
    pub fn window(&self) -> (u64, u64) {
        (self.offset, self.offset + self.pattern.len() as u64)
    }

    /// Compare a window read at [`Signature::window`] against the pattern.
    ///
    /// A short window (source ended early) never matches.
    #[inline]
    pub fn matches(&self, window: &[u8]) -> bool {
        window.len() >= self.pattern.len() && &window[..self.pattern.len()] == self.pattern
    }

    #[inline]
    pub fn extension(&self) -> &'static str {
        self.file_type.extension()
    }

    #[inline]
    pub fn mime(&self) -> &'static str {
        self.file_type.mime_type()
    }

    #[inline]
    pub fn result(&self) -> DetectionResult {
        self.file_type.result()
    }

    /// Whether a match hands control to the ZIP entry walker.
    #[inline]
    pub fn is_zip(&self) -> bool {
        self.file_type == FileType::Zip
    }
}

/// Signatures in priority order.
///
/// Two checks are intentionally narrow:
/// - WEBP only looks for `WEBP` at offset 8 and does not verify the leading
///   `RIFF` tag.
/// - S3M looks for `SCRM` at offset 0 rather than at 0x2C, so only sources
///   that literally begin with `SCRM` match.
pub static SIGNATURES: &[Signature] = &[
    Signature::new(PNG_SIGNATURE, 0, FileType::Png),
    Signature::new(JPEG_SIGNATURE, 0, FileType::Jpg),
    Signature::new(WEBP_SIGNATURE, 8, FileType::Webp),
    Signature::new(BMP_SIGNATURE, 0, FileType::Bmp),
    Signature::new(GIF_SIGNATURE, 0, FileType::Gif),
    Signature::new(PDF_SIGNATURE, 0, FileType::Pdf),
    Signature::new(ICO_SIGNATURE, 0, FileType::Ico),
    Signature::new(ZIP_SIGNATURE, 0, FileType::Zip),
    Signature::new(EXE_SIGNATURE, 0, FileType::Exe),
    Signature::new(S3M_SIGNATURE, 0, FileType::S3m),
    Signature::new(SHP_SIGNATURE, 2, FileType::Shp),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let order: Vec<&str> = SIGNATURES.iter().map(|s| s.extension()).collect();
        assert_eq!(
            order,
            [
                "png", "jpg", "webp", "bmp", "gif", "pdf", "ico", "zip", "exe", "s3m", "shp"
            ]
        );
    }

    #[test]
    fn test_only_zip_hands_off() {
        let zip: Vec<_> = SIGNATURES.iter().filter(|s| s.is_zip()).collect();
        assert_eq!(zip.len(), 1);
        assert_eq!(zip[0].pattern, b"PK\x03\x04");
    }

    #[test]
    fn test_windows() {
        let webp = SIGNATURES[2];
        assert_eq!(webp.window(), (8, 12));
        let shp = SIGNATURES[SIGNATURES.len() - 1];
        assert_eq!(shp.window(), (2, 14));
    }

    #[test]
    fn test_matches_requires_full_pattern() {
        let png = SIGNATURES[0];
        assert!(png.matches(PNG_SIGNATURE));
        assert!(!png.matches(&PNG_SIGNATURE[..7]));
        assert!(!png.matches(&[]));

        let mut corrupted = PNG_SIGNATURE.to_vec();
        corrupted[7] = 0x0B;
        assert!(!png.matches(&corrupted));
    }
}
