//! Sequential byte cursor over a seal buffer.
//!
//! All zone decoders read through this cursor. The position only ever moves
//! forward by exactly the consumed length, and a read past the end fails with
//! the offset where it was attempted.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

/// Sequential reader over a fixed byte buffer with position tracking.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read position in bytes.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Read a single byte and advance.
    pub fn read_u8(&mut self) -> Result<u8> {
        let b = *self
            .data
            .get(self.pos)
            .ok_or(Error::UnexpectedEof { offset: self.pos })?;
        self.pos += 1;
        Ok(b)
    }

    /// Look at the next byte without advancing.
    pub fn peek_u8(&self) -> Result<u8> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(Error::UnexpectedEof { offset: self.pos })
    }

    /// Read `n` bytes and advance.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof { offset: self.pos });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a big-endian 16-bit word.
    pub fn read_u16_be(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(BigEndian::read_u16(bytes))
    }

    /// Read a big-endian 24-bit word into the low bytes of a u32.
    pub fn read_u24_be(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(3)?;
        Ok(BigEndian::read_u24(bytes))
    }
}
