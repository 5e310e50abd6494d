// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Position-tracked input source.

use byteorder::{ByteOrder, LittleEndian};

use crate::config::MAX_VARINT_LEN;
use crate::error::{LedgerError, Result};

/// Saved reader position, see [`Reader::mark`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark(usize);

/// Reads wire primitives from a borrowed byte slice.
///
/// A failed read never advances the position.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn reset(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if needed > self.remaining() {
            return Err(LedgerError::Truncated {
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn get_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn get_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.get_bytes(N)?);
        Ok(out)
    }

    pub fn get_u8(&mut self) -> Result<u8> {
        Ok(self.get_bytes(1)?[0])
    }

    pub fn get_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.get_bytes(4)?))
    }

    pub fn get_u64(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.get_bytes(8)?))
    }

    pub fn get_i64(&mut self) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.get_bytes(8)?))
    }

    /// Unsigned LEB128. Overlong and overflowing forms are rejected so every
    /// value has exactly one accepted encoding.
    pub fn get_varint(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut value: u64 = 0;
        for i in 0..MAX_VARINT_LEN {
            let byte = match self.get_u8() {
                Ok(b) => b,
                Err(e) => {
                    self.pos = start;
                    return Err(e);
                }
            };
            let group = (byte & 0x7f) as u64;
            // The tenth byte may only carry the single top bit of a u64.
            if i == MAX_VARINT_LEN - 1 && byte > 0x01 {
                self.pos = start;
                return Err(LedgerError::InvalidValue("varint overflows u64".into()));
            }
            value |= group << (7 * i);
            if byte & 0x80 == 0 {
                if byte == 0 && i > 0 {
                    self.pos = start;
                    return Err(LedgerError::InvalidValue(
                        "non-canonical varint encoding".into(),
                    ));
                }
                return Ok(value);
            }
        }
        self.pos = start;
        Err(LedgerError::InvalidValue("varint longer than 10 bytes".into()))
    }

    /// Varint length checked against `usize` and the remaining input.
    pub fn get_length(&mut self) -> Result<usize> {
        let start = self.pos;
        let raw = self.get_varint()?;
        let Ok(len) = usize::try_from(raw) else {
            self.pos = start;
            return Err(LedgerError::InvalidValue(format!("length {} exceeds usize", raw)));
        };
        if let Err(e) = self.ensure(len) {
            self.pos = start;
            return Err(e);
        }
        Ok(len)
    }

    /// Length-prefixed blob.
    pub fn get_var_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        let len = self.get_length()?;
        match self.get_bytes(len) {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                self.pos = start;
                Err(e)
            }
        }
    }

    /// Count prefix for a sequence whose elements occupy at least
    /// `min_element_len` bytes each. Fails with `Truncated` when the count can
    /// not possibly fit, before the caller allocates anything.
    pub fn get_count(&mut self, min_element_len: usize) -> Result<usize> {
        let start = self.pos;
        let count = self.get_varint()?;
        let needed = usize::try_from(count)
            .ok()
            .and_then(|c| c.checked_mul(min_element_len));
        match needed {
            Some(needed) if needed <= self.remaining() => Ok(count as usize),
            Some(needed) => {
                let remaining = self.remaining();
                self.pos = start;
                Err(LedgerError::Truncated { needed, remaining })
            }
            None => {
                let remaining = self.remaining();
                self.pos = start;
                Err(LedgerError::Truncated { needed: usize::MAX, remaining })
            }
        }
    }
}
