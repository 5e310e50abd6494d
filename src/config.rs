// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

/// Length in bytes of a box identifier (BLAKE3 output).
pub const BOX_ID_LEN: usize = 32;

/// Length in bytes of a transaction identifier.
pub const TRANSACTION_ID_LEN: usize = 32;

/// Length in bytes of an ed25519 public key carried by a proposition.
pub const PUBLIC_KEY_25519_LEN: usize = 32;

/// Length in bytes of a mainchain public key hash (RIPEMD160 of SHA256).
pub const MC_PUBLIC_KEY_HASH_LEN: usize = 20;

/// Upper bound for a LEB128-encoded u64.
pub const MAX_VARINT_LEN: usize = 10;

/// Maximum size in bytes of a single input's unlocking proof.
pub const MAX_PROOF_SIZE: usize = 65536;

/// The only transaction format version this build understands.
pub const TRANSACTION_VERSION: u8 = 1;
