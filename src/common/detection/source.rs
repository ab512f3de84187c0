//! Byte sources the sniffer can read from.
//!
//! Magic number checks only ever need a few bytes near the start of the
//! source, so [`ByteSource::read_window`] must be able to serve a bounded
//! range without loading everything. The ZIP walker is the only caller of
//! [`ByteSource::read_all`].
//!
//! Reading past the end is not an error: the returned buffer is simply
//! shorter than requested.

use std::borrow::Cow;
use std::io::{self, Read, Seek, SeekFrom};
use std::ops::Range;

use bytes::Bytes;
use smallvec::SmallVec;

use crate::common::error::Result;

/// Inline capacity of a [`Window`]. Covers every magic number in the table.
const WINDOW_INLINE: usize = 16;

/// Bytes returned by [`ByteSource::read_window`].
pub type Window = SmallVec<[u8; WINDOW_INLINE]>;

/// A readable, sliceable sequence of bytes of known or unknown length.
pub trait ByteSource {
    /// Total length, or `None` when it cannot be determined up front.
    fn size(&self) -> Option<u64>;

    /// Read the byte range `[start, end)`, or fewer bytes if the source ends first.
    fn read_window(&mut self, start: u64, end: u64) -> Result<Window>;

    /// Read the entire source.
    fn read_all(&mut self) -> Result<Cow<'_, [u8]>>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn size(&self) -> Option<u64> {
        (**self).size()
    }

    #[inline]
    fn read_window(&mut self, start: u64, end: u64) -> Result<Window> {
        (**self).read_window(start, end)
    }

    #[inline]
    fn read_all(&mut self) -> Result<Cow<'_, [u8]>> {
        (**self).read_all()
    }
}

/// Clamp `[start, end)` to a buffer of `len` bytes.
#[inline]
fn clamp_range(len: usize, start: u64, end: u64) -> Range<usize> {
    let len = len as u64;
    let start = start.min(len);
    let end = end.min(len).max(start);
    start as usize..end as usize
}

#[inline]
fn slice_window(data: &[u8], start: u64, end: u64) -> Window {
    Window::from_slice(&data[clamp_range(data.len(), start, end)])
}

impl ByteSource for &[u8] {
    #[inline]
    fn size(&self) -> Option<u64> {
        Some(self.len() as u64)
    }

    #[inline]
    fn read_window(&mut self, start: u64, end: u64) -> Result<Window> {
        Ok(slice_window(self, start, end))
    }

    #[inline]
    fn read_all(&mut self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(*self))
    }
}

impl ByteSource for Vec<u8> {
    #[inline]
    fn size(&self) -> Option<u64> {
        Some(self.len() as u64)
    }

    #[inline]
    fn read_window(&mut self, start: u64, end: u64) -> Result<Window> {
        Ok(slice_window(self, start, end))
    }

    #[inline]
    fn read_all(&mut self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl ByteSource for Bytes {
    #[inline]
    fn size(&self) -> Option<u64> {
        Some(self.len() as u64)
    }

    #[inline]
    fn read_window(&mut self, start: u64, end: u64) -> Result<Window> {
        Ok(slice_window(self, start, end))
    }

    #[inline]
    fn read_all(&mut self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(&self[..]))
    }
}

/// Read until `buf` is full or the reader is exhausted.
fn read_up_to<R: Read>(mut reader: R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

/// Read at most `len` bytes from `reader` into a window.
fn read_window_from<R: Read>(reader: R, len: u64) -> io::Result<Window> {
    if len <= WINDOW_INLINE as u64 {
        let mut window = Window::from_elem(0, len as usize);
        let n = read_up_to(reader, &mut window)?;
        window.truncate(n);
        Ok(window)
    } else {
        let mut buf = Vec::new();
        reader.take(len).read_to_end(&mut buf)?;
        Ok(Window::from_vec(buf))
    }
}

/// Byte source over any seekable reader, such as a [`std::fs::File`].
///
/// The total length is measured once by seeking to the end.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
    size: u64,
}

impl<R: Read + Seek> ReaderSource<R> {
    pub fn new(mut inner: R) -> Result<Self> {
        let size = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, size })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ByteSource for ReaderSource<R> {
    #[inline]
    fn size(&self) -> Option<u64> {
        Some(self.size)
    }

    fn read_window(&mut self, start: u64, end: u64) -> Result<Window> {
        let end = end.min(self.size);
        if start >= end {
            return Ok(Window::new());
        }
        self.inner.seek(SeekFrom::Start(start))?;
        Ok(read_window_from(&mut self.inner, end - start)?)
    }

    fn read_all(&mut self) -> Result<Cow<'_, [u8]>> {
        self.inner.seek(SeekFrom::Start(0))?;
        let mut data = Vec::with_capacity(usize::try_from(self.size).unwrap_or(0));
        self.inner.read_to_end(&mut data)?;
        Ok(Cow::Owned(data))
    }
}

/// Byte source over a forward-only stream whose length is not known.
///
/// Bytes are buffered as they are read so that windows can be served
/// repeatedly; the stream itself is never rewound.
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: R,
    buffered: Vec<u8>,
    exhausted: bool,
}

impl<R: Read> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffered: Vec::new(),
            exhausted: false,
        }
    }

    /// Buffer the stream up to `end` bytes, or to its end.
    fn fill_to(&mut self, end: u64) -> io::Result<()> {
        let have = self.buffered.len() as u64;
        if self.exhausted || end <= have {
            return Ok(());
        }
        let wanted = end - have;
        let read = (&mut self.inner)
            .take(wanted)
            .read_to_end(&mut self.buffered)? as u64;
        if read < wanted {
            self.exhausted = true;
        }
        Ok(())
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    #[inline]
    fn size(&self) -> Option<u64> {
        None
    }

    fn read_window(&mut self, start: u64, end: u64) -> Result<Window> {
        self.fill_to(end)?;
        Ok(slice_window(&self.buffered, start, end))
    }

    fn read_all(&mut self) -> Result<Cow<'_, [u8]>> {
        if !self.exhausted {
            self.inner.read_to_end(&mut self.buffered)?;
            self.exhausted = true;
        }
        Ok(Cow::Borrowed(&self.buffered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that fails every call, like a revoked file handle.
    struct Revoked;

    impl Read for Revoked {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "handle revoked"))
        }
    }

    /// Reader that hands out one byte per call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn test_slice_windows_clamp() {
        let mut source: &[u8] = b"0123456789";
        assert_eq!(source.size(), Some(10));
        assert_eq!(source.read_window(2, 5).unwrap().as_slice(), b"234");
        assert_eq!(source.read_window(8, 20).unwrap().as_slice(), b"89");
        assert!(source.read_window(12, 20).unwrap().is_empty());
        assert!(source.read_window(5, 3).unwrap().is_empty());
        assert_eq!(&*source.read_all().unwrap(), b"0123456789");
    }

    #[test]
    fn test_owned_sources() {
        let mut vec = b"%PDF-1.7".to_vec();
        assert_eq!(vec.read_window(0, 4).unwrap().as_slice(), b"%PDF");
        assert_eq!(vec.size(), Some(8));

        let mut bytes = Bytes::from_static(b"GIF89a");
        assert_eq!(bytes.read_window(0, 3).unwrap().as_slice(), b"GIF");
        assert_eq!(&*bytes.read_all().unwrap(), b"GIF89a");
    }

    #[test]
    fn test_reader_source() {
        let mut source = ReaderSource::new(Cursor::new(b"abcdefgh".to_vec())).unwrap();
        assert_eq!(source.size(), Some(8));
        assert_eq!(source.read_window(4, 6).unwrap().as_slice(), b"ef");
        assert_eq!(source.read_window(0, 2).unwrap().as_slice(), b"ab");
        assert_eq!(source.read_window(6, 100).unwrap().as_slice(), b"gh");
        assert!(source.read_window(9, 12).unwrap().is_empty());
        assert_eq!(&*source.read_all().unwrap(), b"abcdefgh");
    }

    #[test]
    fn test_reader_source_large_window() {
        let data: Vec<u8> = (0..=255).collect();
        let mut source = ReaderSource::new(Cursor::new(data.clone())).unwrap();
        assert_eq!(source.read_window(10, 200).unwrap().as_slice(), &data[10..200]);
    }

    #[test]
    fn test_stream_source_has_unknown_size() {
        let mut source = StreamSource::new(Trickle(b"PK\x03\x04rest"));
        assert_eq!(source.size(), None);
        assert_eq!(source.read_window(0, 4).unwrap().as_slice(), b"PK\x03\x04");
        assert_eq!(source.read_window(2, 6).unwrap().as_slice(), b"\x03\x04re");
        assert_eq!(source.read_window(6, 50).unwrap().as_slice(), b"st");
        assert_eq!(&*source.read_all().unwrap(), b"PK\x03\x04rest");
    }

    #[test]
    fn test_stream_source_read_all_after_partial_window() {
        let mut source = StreamSource::new(Cursor::new(b"0123456789".to_vec()));
        assert_eq!(source.read_window(0, 3).unwrap().as_slice(), b"012");
        assert_eq!(&*source.read_all().unwrap(), b"0123456789");
    }

    #[test]
    fn test_read_failure_is_io_error() {
        let mut source = StreamSource::new(Revoked);
        let err = source.read_window(0, 4).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
        assert!(source.read_all().is_err());
    }
}
