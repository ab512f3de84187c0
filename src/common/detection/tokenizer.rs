//! Forward-only tokenizer over an in-memory buffer.
//!
//! Reads that need more bytes than remain return [`EndOfStream`] instead of
//! a short result; the ZIP walker treats that as the normal end of a scan.

use std::borrow::Cow;

use thiserror::Error;

/// A read asked for more bytes than the stream has left.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("end of stream: requested {requested} bytes, {available} available")]
pub struct EndOfStream {
    pub requested: u64,
    pub available: u64,
}

/// Total length of the stream behind a [`Cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamSize {
    /// Length known up front
    Known(u64),
    /// Length could not be determined; only end-of-stream stops a scan
    Unbounded,
}

impl StreamSize {
    /// Whether `position` lies strictly before the end.
    #[inline]
    pub fn exceeds(self, position: u64) -> bool {
        match self {
            StreamSize::Known(size) => position < size,
            StreamSize::Unbounded => true,
        }
    }
}

impl From<Option<u64>> for StreamSize {
    fn from(size: Option<u64>) -> Self {
        size.map_or(StreamSize::Unbounded, StreamSize::Known)
    }
}

/// Scan position within one detection call. Never moves backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub position: u64,
    pub size: StreamSize,
}

impl Cursor {
    pub fn new(size: StreamSize) -> Self {
        Self { position: 0, size }
    }
}

/// Tokenizer reading successive fields out of `data`.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    data: &'a [u8],
    cursor: Cursor,
}

impl<'a> Tokenizer<'a> {
    pub fn new(data: &'a [u8], size: StreamSize) -> Self {
        Self {
            data,
            cursor: Cursor::new(size),
        }
    }

    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.cursor.position
    }

    /// Bytes left between the cursor and the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.cursor.position as usize)
    }

    #[inline]
    fn rest(&self) -> &'a [u8] {
        let start = (self.cursor.position as usize).min(self.data.len());
        &self.data[start..]
    }

    /// Consume exactly `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], EndOfStream> {
        let rest = self.rest();
        if rest.len() < len {
            return Err(EndOfStream {
                requested: len as u64,
                available: rest.len() as u64,
            });
        }
        self.cursor.position += len as u64;
        Ok(&rest[..len])
    }

    /// Consume exactly `len` bytes and decode them as (lossy) UTF-8.
    pub fn read_string(&mut self, len: usize) -> Result<Cow<'a, str>, EndOfStream> {
        self.read_bytes(len).map(String::from_utf8_lossy)
    }

    /// Copy up to `buf.len()` bytes without consuming them.
    ///
    /// Returns how many bytes were copied; fewer near the end of the stream.
    pub fn peek(&self, buf: &mut [u8]) -> usize {
        let rest = self.rest();
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        n
    }

    /// Advance past `len` bytes, stopping at the end of the buffer.
    ///
    /// Returns how far the cursor actually moved.
    pub fn ignore(&mut self, len: u64) -> u64 {
        let skipped = len.min(self.remaining() as u64);
        self.cursor.position += skipped;
        skipped
    }
}
