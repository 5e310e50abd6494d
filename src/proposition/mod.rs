// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ownership predicates.
//!
//! A proposition is identified by its concrete type and a fixed-length payload.
//! Equality and encoding depend on nothing else.

use core::any::Any;
use core::fmt;

use crate::codec::{Reader, Writer};
use crate::error::Result;

pub mod mc_public_key_hash;
pub mod public_key_25519;

pub use mc_public_key_hash::{MCPublicKeyHashProposition, MCPublicKeyHashPropositionSerializer};
pub use public_key_25519::{PublicKey25519Proposition, PublicKey25519PropositionSerializer};

pub trait Proposition: Any + fmt::Debug + Send + Sync {
    /// Canonical payload, exactly as written on the wire.
    fn bytes(&self) -> &[u8];

    fn as_any(&self) -> &dyn Any;

    fn clone_proposition(&self) -> Box<dyn Proposition>;

    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl PartialEq for dyn Proposition {
    fn eq(&self, other: &Self) -> bool {
        self.as_any().type_id() == other.as_any().type_id() && self.bytes() == other.bytes()
    }
}

impl Eq for dyn Proposition {}

impl Clone for Box<dyn Proposition> {
    fn clone(&self) -> Self {
        self.clone_proposition()
    }
}

/// Leaf serializer for one concrete proposition type.
///
/// Writes the bare payload. Framing (the type tag) belongs to the registry.
pub trait PropositionSerializer: Send + Sync + 'static {
    type Value: Proposition;

    fn serialize(&self, proposition: &Self::Value, writer: &mut dyn Writer);

    fn parse(&self, reader: &mut Reader<'_>) -> Result<Self::Value>;
}
