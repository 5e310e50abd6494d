// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! sidechain-ledger: box/proposition/transaction model of a UTXO sidechain and
//! its deterministic, tag-dispatched wire format.

pub mod config;
pub mod error;
pub mod codec;
pub mod types;
pub mod hash;
pub mod proposition;
pub mod boxes;
pub mod transaction;
pub mod registry;

pub use error::{LedgerError, Result};
pub use registry::{SerializerRegistry, SerializerRegistryBuilder};

#[cfg(test)]
pub mod tests;
