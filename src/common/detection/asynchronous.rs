//! Async detection over tokio readers.
//!
//! Windows and the archive body are read with tokio I/O; matching and ZIP
//! walking are the same in-memory code the blocking path uses.

use std::io::SeekFrom;
use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

use super::functions::Detector;
use super::matcher::window_matches;
use super::signatures::SIGNATURES;
use super::source::Window;
use super::types::DetectionResult;
use super::zip::classify_zip;
use crate::common::error::Result;

/// Read `[start, end)` from `reader`, or fewer bytes at the end of the source.
async fn read_window<R>(reader: &mut R, start: u64, end: u64) -> Result<Window>
where
    R: AsyncRead + AsyncSeek + Unpin,
{
    if start >= end {
        return Ok(Window::new());
    }
    reader.seek(SeekFrom::Start(start)).await?;
    let mut buf = Vec::new();
    (&mut *reader).take(end - start).read_to_end(&mut buf).await?;
    Ok(Window::from_vec(buf))
}

impl Detector {
    /// Detect the type of an async seekable reader.
    ///
    /// Mirrors [`Detector::detect`]: each signature window is read with a
    /// seek plus a bounded read, and only a ZIP match loads the archive
    /// (up to `max_archive_bytes`) for walking.
    ///
    /// # Arguments
    ///
    /// * `reader` - Any tokio `AsyncRead + AsyncSeek`, such as `tokio::fs::File`
    ///
    /// # Returns
    ///
    /// * `Ok(DetectionResult)` for the detected type, or
    ///   [`DetectionResult::UNKNOWN`]
    /// * `Err(Error::Io)` if seeking or reading fails
    pub async fn detect_async<R>(&self, mut reader: R) -> Result<DetectionResult>
    where
        R: AsyncRead + AsyncSeek + Unpin,
    {
        let size = reader.seek(SeekFrom::End(0)).await?;

        let mut matched = None;
        for signature in SIGNATURES {
            let (start, end) = signature.window();
            let window = read_window(&mut reader, start, end.min(size)).await?;
            if window_matches(signature, &window) {
                matched = Some(signature);
                break;
            }
        }

        let Some(signature) = matched else {
            return Ok(DetectionResult::UNKNOWN);
        };
        if !signature.is_zip() {
            return Ok(signature.result());
        }

        let stream_size = self.archive_size(Some(size));
        let limit = self.config().max_archive_bytes.unwrap_or(size);
        let data = read_window(&mut reader, 0, limit.min(size)).await?;
        Ok(classify_zip(&data, stream_size, self.config().scan_window).result())
    }
}

/// Detect the file type of an async seekable reader with the default configuration.
pub async fn detect_file_type_async<R>(reader: R) -> Result<DetectionResult>
where
    R: AsyncRead + AsyncSeek + Unpin,
{
    Detector::default().detect_async(reader).await
}

/// Detect the file type of the file at `path` using tokio file I/O.
pub async fn detect_file_type_from_path_async<P: AsRef<Path>>(path: P) -> Result<DetectionResult> {
    let file = tokio::fs::File::open(path).await?;
    detect_file_type_async(file).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::detection::config::DetectorConfig;
    use crate::common::detection::types::FileType;
    use crate::common::detection::zip::tests::{archive, stored, streamed};
    use crate::common::detection::detect_file_type_from_bytes;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_async_matches_blocking_path() {
        let inputs: Vec<Vec<u8>> = vec![
            Vec::new(),
            b"\x89PNG\r\n\x1a\n".to_vec(),
            b"RIFF\x00\x00\x00\x00WEBP".to_vec(),
            b"\x00\x00\x27\x0A\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00".to_vec(),
            b"PK\x03\x04".to_vec(),
            archive(&[
                streamed("content.bin", b"payload"),
                stored("mimetype", b"application/epub+zip"),
            ]),
            archive(&[stored("_rels/.rels", b""), stored("xl/workbook.xml", b"")]),
        ];
        for data in inputs {
            let blocking = detect_file_type_from_bytes(&data);
            let async_result = detect_file_type_async(Cursor::new(data)).await.unwrap();
            assert_eq!(async_result, blocking);
        }
    }

    #[tokio::test]
    async fn test_async_respects_archive_bound() {
        let data = archive(&[
            stored("readme.txt", &[b'x'; 200]),
            stored("3D/3dmodel.model", b"<model/>"),
        ]);
        let bounded =
            Detector::new(DetectorConfig::default().with_max_archive_bytes(100)).unwrap();
        let result = bounded.detect_async(Cursor::new(data.clone())).await.unwrap();
        assert_eq!(result, FileType::Zip.result());

        let result = detect_file_type_async(Cursor::new(data)).await.unwrap();
        assert_eq!(result.file_type(), FileType::ThreeMf);
    }

    #[tokio::test]
    async fn test_async_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picture.bin");
        tokio::fs::write(&path, b"GIF89a\x01\x00\x01\x00").await.unwrap();
        let result = detect_file_type_from_path_async(&path).await.unwrap();
        assert_eq!(result.extension, "gif");

        let missing = detect_file_type_from_path_async(dir.path().join("nope")).await;
        assert!(matches!(missing, Err(crate::Error::Io(_))));
    }
}
