//! In-memory byte source.
//!
//! `ByteBuffer` wraps a byte slice and tracks the read position. It is the
//! only source that can look ahead, so replays decoded from memory get the
//! fast string-recovery path.

use crate::error::{Error, Result};
use crate::source::ReadBytes;

/// A position-tracking reader over a byte slice.
///
/// # Example
///
/// ```
/// use bsor_core::source::{ByteBuffer, ReadBytes};
///
/// let data = [0x69, 0x3d, 0x2d, 0x44, 0x01];
/// let mut buf = ByteBuffer::new(&data);
///
/// assert_eq!(buf.read_u32().unwrap(), 0x442d3d69);
/// assert_eq!(buf.remaining(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ByteBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of bytes remaining from the current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Reads `count` bytes and advances the position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedInput`] if fewer than `count` bytes remain.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(Error::TruncatedInput {
                offset: self.pos as u64,
                needed: count - self.remaining(),
            });
        }

        let result = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(result)
    }

    /// Returns the bytes at `offset` past the current position without advancing.
    fn slice_ahead(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let start = self.pos.checked_add(offset)?;
        let end = start.checked_add(len)?;
        self.data.get(start..end)
    }
}

impl ReadBytes for ByteBuffer<'_> {
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        let bytes = self.read_bytes(buf.len())?;
        buf.copy_from_slice(bytes);
        Ok(())
    }

    fn read_u8_or_eof(&mut self) -> Result<Option<u8>> {
        if self.remaining() == 0 {
            return Ok(None);
        }
        Ok(Some(self.read_bytes(1)?[0]))
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }

    fn peek_u32_at(&self, offset: usize) -> Option<u32> {
        let bytes = self.slice_ahead(offset, 4)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        Ok(self.read_bytes(len)?.to_vec())
    }
}
