use crate::config::limits::PREALLOC_LIMIT;
use crate::error::{Error, Result};

/// Trait for sequential byte sources the decoder consumes.
///
/// Sources that can look ahead without consuming override [`ReadBytes::peek_u32_at`];
/// the decoder uses that to verify string lengths before committing to them.
pub trait ReadBytes {
    /// Fill `buf` completely or fail with [`Error::TruncatedInput`].
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Read one byte, or `None` if the input ended exactly here.
    fn read_u8_or_eof(&mut self) -> Result<Option<u8>>;

    /// Number of bytes consumed so far.
    fn position(&self) -> u64;

    /// Peek a little-endian u32 located `offset` bytes past the current position.
    ///
    /// Returns `None` when the source cannot look ahead or the bytes are not there.
    fn peek_u32_at(&self, _offset: usize) -> Option<u32> {
        None
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_exact_bytes(&mut buf)?;
        Ok(buf)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a boolean stored as one byte (any non-zero value is true).
    fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Read `len` bytes into a new vector.
    ///
    /// Large lengths are read in chunks so a bogus length fails on truncation
    /// instead of allocating the whole claimed size first.
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        let mut chunk = [0u8; 4096];
        let mut left = len;
        while left > 0 {
            let n = left.min(chunk.len());
            self.read_exact_bytes(&mut chunk[..n]).map_err(|e| match e {
                Error::TruncatedInput { offset, .. } => Error::TruncatedInput {
                    offset,
                    needed: left,
                },
                other => other,
            })?;
            out.extend_from_slice(&chunk[..n]);
            left -= n;
        }
        Ok(out)
    }

    /// Read a length-prefixed string without any recovery.
    fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.read_vec(len)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
