// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Primitive wire codec.
//!
//! # Wire Rules
//! - Fixed-width integers are little-endian
//! - Variable-width integers are unsigned LEB128, minimal form only
//! - Variable-length blobs are prefixed with their varint length
//! - Sequences are count-prefixed, never terminator-delimited

pub mod reader;
pub mod writer;

pub use reader::{Mark, Reader};
pub use writer::Writer;

/// Number of bytes `value` occupies as a varint.
pub fn varint_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}
