// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Mainchain public key hash proposition.
//!
//! Owner of funds that leave the sidechain: the payload is the 20-byte hash of
//! a mainchain public key, i.e. a P2PKH destination.

use core::any::Any;

use crate::codec::{Reader, Writer};
use crate::config::MC_PUBLIC_KEY_HASH_LEN;
use crate::error::{LedgerError, Result};
use crate::proposition::{Proposition, PropositionSerializer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MCPublicKeyHashProposition([u8; MC_PUBLIC_KEY_HASH_LEN]);

impl MCPublicKeyHashProposition {
    pub fn new(pub_key_hash: [u8; MC_PUBLIC_KEY_HASH_LEN]) -> Self {
        Self(pub_key_hash)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let hash = <[u8; MC_PUBLIC_KEY_HASH_LEN]>::try_from(bytes).map_err(|_| {
            LedgerError::InvalidValue(format!(
                "mainchain public key hash must be {} bytes, got {}",
                MC_PUBLIC_KEY_HASH_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(hash))
    }

    pub fn pub_key_hash(&self) -> &[u8; MC_PUBLIC_KEY_HASH_LEN] {
        &self.0
    }
}

impl Proposition for MCPublicKeyHashProposition {
    fn bytes(&self) -> &[u8] {
        &self.0
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_proposition(&self) -> Box<dyn Proposition> {
        Box::new(*self)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MCPublicKeyHashPropositionSerializer;

impl PropositionSerializer for MCPublicKeyHashPropositionSerializer {
    type Value = MCPublicKeyHashProposition;

    fn serialize(&self, proposition: &MCPublicKeyHashProposition, writer: &mut dyn Writer) {
        writer.put_bytes(&proposition.0);
    }

    /// Consumes exactly the hash length; anything after it belongs to the
    /// enclosing entity.
    fn parse(&self, reader: &mut Reader<'_>) -> Result<MCPublicKeyHashProposition> {
        Ok(MCPublicKeyHashProposition(reader.get_array()?))
    }
}
