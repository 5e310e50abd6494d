// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use core::any::Any;

use crate::codec::{Reader, Writer};
use crate::config::PUBLIC_KEY_25519_LEN;
use crate::error::{LedgerError, Result};
use crate::proposition::{Proposition, PropositionSerializer};

/// Locks a box to the holder of an ed25519 secret key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey25519Proposition([u8; PUBLIC_KEY_25519_LEN]);

impl PublicKey25519Proposition {
    pub fn new(public_key: [u8; PUBLIC_KEY_25519_LEN]) -> Self {
        Self(public_key)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key = <[u8; PUBLIC_KEY_25519_LEN]>::try_from(bytes).map_err(|_| {
            LedgerError::InvalidValue(format!(
                "ed25519 public key must be {} bytes, got {}",
                PUBLIC_KEY_25519_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(key))
    }

    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_25519_LEN] {
        &self.0
    }
}

impl Proposition for PublicKey25519Proposition {
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
pub struct PublicKey25519PropositionSerializer;

impl PropositionSerializer for PublicKey25519PropositionSerializer {
    type Value = PublicKey25519Proposition;

    fn serialize(&self, proposition: &PublicKey25519Proposition, writer: &mut dyn Writer) {
        writer.put_bytes(&proposition.0);
    }

    fn parse(&self, reader: &mut Reader<'_>) -> Result<PublicKey25519Proposition> {
        Ok(PublicKey25519Proposition(reader.get_array()?))
    }
}
