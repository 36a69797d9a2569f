//! A bounds-checked reader over a byte slice.

use crate::{ZoneinfoError, ZoneinfoResult};

/// Reads big-endian values from the front of a byte slice. Every read that
/// would run past the end fails with `TruncatedData` and consumes nothing.
#[derive(Debug, Clone)]
pub(crate) struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) const fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Fails unless at least `len` bytes remain.
    pub(crate) fn ensure(&self, len: usize, what: &'static str) -> ZoneinfoResult<()> {
        if self.remaining() < len {
            return Err(ZoneinfoError::truncated_data().with_message(what));
        }
        Ok(())
    }

    pub(crate) fn take(&mut self, len: usize) -> ZoneinfoResult<&'a [u8]> {
        self.ensure(len, "data ends before the expected length.")?;
        let out = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    pub(crate) fn skip(&mut self, len: usize) -> ZoneinfoResult<()> {
        self.take(len).map(|_| ())
    }

    fn take_array<const N: usize>(&mut self) -> ZoneinfoResult<[u8; N]> {
        let mut out = [0; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub(crate) fn read_u8(&mut self) -> ZoneinfoResult<u8> {
        self.take_array::<1>().map(|[b]| b)
    }

    pub(crate) fn read_i32(&mut self) -> ZoneinfoResult<i32> {
        self.take_array().map(i32::from_be_bytes)
    }

    pub(crate) fn read_i64(&mut self) -> ZoneinfoResult<i64> {
        self.take_array().map(i64::from_be_bytes)
    }

    /// Reads a transition time stored in `size` bytes, 4 or 8.
    pub(crate) fn read_time(&mut self, size: usize) -> ZoneinfoResult<i64> {
        if size == 8 {
            self.read_i64()
        } else {
            self.read_i32().map(i64::from)
        }
    }

    /// Returns the bytes not yet read without consuming them.
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}
