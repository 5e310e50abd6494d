// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Tags of the types every node understands.
//!
//! These values are part of the wire format and must never be reassigned.
//! Sidechain-specific types register on top of them with unused tags.

use crate::boxes::{WithdrawalRequestBoxSerializer, ZenBoxSerializer};
use crate::error::Result;
use crate::proposition::{MCPublicKeyHashPropositionSerializer, PublicKey25519PropositionSerializer};
use crate::registry::{SerializerRegistry, SerializerRegistryBuilder};
use crate::transaction::RegularTransactionSerializer;
use crate::types::TypeTag;

pub const PUBLIC_KEY_25519_PROPOSITION: TypeTag = TypeTag(1);
pub const MC_PUBLIC_KEY_HASH_PROPOSITION: TypeTag = TypeTag(2);

pub const ZEN_BOX: TypeTag = TypeTag(1);
pub const WITHDRAWAL_REQUEST_BOX: TypeTag = TypeTag(2);

pub const REGULAR_TRANSACTION: TypeTag = TypeTag(1);

impl SerializerRegistryBuilder {
    /// Builder pre-loaded with the standard types.
    pub fn standard() -> Result<Self> {
        let mut builder = Self::new();
        builder
            .register_proposition(PUBLIC_KEY_25519_PROPOSITION, PublicKey25519PropositionSerializer)?
            .register_proposition(MC_PUBLIC_KEY_HASH_PROPOSITION, MCPublicKeyHashPropositionSerializer)?
            .register_box(ZEN_BOX, ZenBoxSerializer)?
            .register_box(WITHDRAWAL_REQUEST_BOX, WithdrawalRequestBoxSerializer)?
            .register_transaction(REGULAR_TRANSACTION, RegularTransactionSerializer)?;
        Ok(builder)
    }
}

impl SerializerRegistry {
    pub fn standard() -> Result<Self> {
        Ok(SerializerRegistryBuilder::standard()?.build())
    }
}
