// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical BLAKE3 Hashing
//!
//! Box and transaction identifiers are BLAKE3 digests of canonical encodings.
//! The encoder streams straight into the hasher, so the identifier of a value
//! always matches the hash of the bytes the registry would emit for it.

use crate::codec::Writer;
use crate::error::Result;

/// Hashes whatever `encode` writes.
pub fn digest(encode: impl FnOnce(&mut dyn Writer) -> Result<()>) -> Result<[u8; 32]> {
    let mut hasher = blake3::Hasher::new();
    encode(&mut hasher)?;
    Ok(*hasher.finalize().as_bytes())
}

pub fn hash_bytes(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}
