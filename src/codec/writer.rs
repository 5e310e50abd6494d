// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Append-only output sink.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{LedgerError, Result};

/// An append-only byte sink.
///
/// Only `put_bytes` is required; every other primitive is expressed on top of it
/// so all sinks agree on byte order and varint layout.
pub trait Writer {
    fn put_bytes(&mut self, bytes: &[u8]);

    fn put_u8(&mut self, value: u8) {
        self.put_bytes(&[value]);
    }

    fn put_u32(&mut self, value: u32) {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, value);
        self.put_bytes(&buf);
    }

    fn put_u64(&mut self, value: u64) {
        let mut buf = [0u8; 8];
        LittleEndian::write_u64(&mut buf, value);
        self.put_bytes(&buf);
    }

    fn put_i64(&mut self, value: i64) {
        let mut buf = [0u8; 8];
        LittleEndian::write_i64(&mut buf, value);
        self.put_bytes(&buf);
    }

    /// Unsigned LEB128.
    fn put_varint(&mut self, mut value: u64) {
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.put_u8(byte);
                return;
            }
            self.put_u8(byte | 0x80);
        }
    }

    /// Writes a field whose size is implied by its type, not framed on the wire.
    fn put_fixed(&mut self, bytes: &[u8], len: usize) -> Result<()> {
        if bytes.len() != len {
            return Err(LedgerError::InvalidValue(format!(
                "fixed-size field expects {} bytes, got {}",
                len,
                bytes.len()
            )));
        }
        self.put_bytes(bytes);
        Ok(())
    }

    /// Length-prefixed blob.
    fn put_var_bytes(&mut self, bytes: &[u8]) {
        self.put_varint(bytes.len() as u64);
        self.put_bytes(bytes);
    }
}

impl Writer for Vec<u8> {
    fn put_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Feeds written bytes straight into a BLAKE3 hasher, so identifiers can be
/// derived without materializing the encoding.
impl Writer for blake3::Hasher {
    fn put_bytes(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}
