//! Magic number matching against the signature table.

use tracing::debug;

use super::signatures::{SIGNATURES, Signature};
use super::source::ByteSource;
use super::types::DetectionResult;
use crate::common::error::Result;

/// Find the first signature, in priority order, whose pattern is present.
///
/// Each check reads only the window the pattern occupies.
pub fn match_signature<S: ByteSource + ?Sized>(
    source: &mut S,
) -> Result<Option<&'static Signature>> {
    for signature in SIGNATURES {
        let (start, end) = signature.window();
        let window = source.read_window(start, end)?;
        if window_matches(signature, &window) {
            return Ok(Some(signature));
        }
    }
    Ok(None)
}

/// Compare `window` against `signature`, logging a hit.
///
/// Shared by the blocking and async matchers so both report the same event.
pub(crate) fn window_matches(signature: &Signature, window: &[u8]) -> bool {
    let matched = signature.matches(window);
    if matched {
        debug!(
            extension = signature.extension(),
            offset = signature.offset,
            "signature matched"
        );
    }
    matched
}

/// Detect a file type from magic numbers alone.
///
/// A ZIP match is reported as plain `zip`; use
/// [`detect_file_type`](super::detect_file_type) to tell ZIP-based
/// containers apart.
pub fn detect_simple<S: ByteSource + ?Sized>(source: &mut S) -> Result<Option<DetectionResult>> {
    Ok(match_signature(source)?.map(Signature::result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::detection::types::FileType;

    fn simple(data: &[u8]) -> Option<FileType> {
        let mut source = data;
        detect_simple(&mut source)
            .unwrap()
            .map(|result| result.file_type())
    }

    fn padded(prefix: &[u8]) -> Vec<u8> {
        let mut data = prefix.to_vec();
        data.extend_from_slice(&[0xEE; 32]);
        data
    }

    #[test]
    fn test_every_signature_at_its_offset() {
        let cases: &[(&[u8], FileType)] = &[
            (b"\x89PNG\r\n\x1a\n", FileType::Png),
            (b"\xFF\xD8\xFF\xE0", FileType::Jpg),
            (b"RIFF\x24\x00\x00\x00WEBPVP8 ", FileType::Webp),
            (b"BM", FileType::Bmp),
            (b"GIF89a", FileType::Gif),
            (b"%PDF-1.7", FileType::Pdf),
            (b"\x00\x00\x01\x00", FileType::Ico),
            (b"PK\x03\x04", FileType::Zip),
            (b"MZ\x90\x00", FileType::Exe),
            (b"SCRM", FileType::S3m),
            (
                b"\x00\x00\x27\x0A\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00",
                FileType::Shp,
            ),
        ];
        for (prefix, expected) in cases {
            assert_eq!(simple(&padded(prefix)), Some(*expected), "{expected}");
        }
    }

    #[test]
    fn test_short_and_empty_inputs() {
        assert_eq!(simple(b""), None);
        assert_eq!(simple(b"\x89PN"), None);
        assert_eq!(simple(b"P"), None);
        assert_eq!(simple(b"plain text that matches nothing"), None);
    }

    #[test]
    fn test_webp_does_not_check_riff_tag() {
        // Only the WEBP tag at offset 8 is checked
        assert_eq!(simple(b"XXXXXXXXWEBP"), Some(FileType::Webp));
        assert_eq!(simple(b"RIFF\x00\x00\x00\x00WEBQ"), None);
    }

    #[test]
    fn test_s3m_tag_checked_at_offset_zero() {
        // A conventional S3M keeps SCRM at 0x2C; that layout is not recognized
        let mut conventional = vec![0x20; 0x2C];
        conventional.extend_from_slice(b"SCRM");
        assert_eq!(simple(&conventional), None);
        assert_eq!(simple(b"SCRM"), Some(FileType::S3m));
    }

    #[test]
    fn test_priority_beats_later_matches() {
        // BMP magic at 0 and WEBP tag at 8: WEBP is earlier in the table
        assert_eq!(simple(b"BMxxxxxxWEBP"), Some(FileType::Webp));
        // MZ plus an SHP pattern at offset 2 resolves to EXE
        assert_eq!(
            simple(b"MZ\x27\x0A\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00"),
            Some(FileType::Exe)
        );
    }

    #[test]
    fn test_match_signature_returns_table_entry() {
        let mut source: &[u8] = b"PK\x03\x04";
        let signature = match_signature(&mut source).unwrap().unwrap();
        assert!(signature.is_zip());
        assert_eq!(signature.offset, 0);
    }
}
