use crate::error::{ElfError, Result};
use std::io::{self, Read, Seek, SeekFrom};

/// A finite, positioned byte source. Every read is bounds-checked against the
/// length captured at construction before any buffer is allocated.
#[derive(Debug)]
pub struct ByteSource<R> {
    inner: R,
    len: u64,
}

impl<R: Read + Seek> ByteSource<R> {
    pub fn new(mut inner: R) -> io::Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, len })
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads exactly `len` bytes at absolute `offset`.
    ///
    /// A range that does not fit inside the source, or a read that comes back
    /// short, is reported as [`FormatError::Truncated`](crate::FormatError::Truncated)
    /// carrying the expected and available byte counts.
    pub fn read_at(&mut self, offset: u64, len: u64, what: &str) -> Result<Vec<u8>> {
        let available = self.len.saturating_sub(offset);
        match offset.checked_add(len) {
            Some(end) if end <= self.len => {}
            _ => return Err(ElfError::truncated(what, offset, len, available)),
        }

        self.inner.seek(SeekFrom::Start(offset))?;
        // len <= self.len here, so the allocation is bounded by the real size
        let mut buf = Vec::with_capacity(len as usize);
        let got = (&mut self.inner).take(len).read_to_end(&mut buf)? as u64;
        if got != len {
            return Err(ElfError::truncated(what, offset, len, got));
        }
        Ok(buf)
    }
}
