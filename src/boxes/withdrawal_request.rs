// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Withdrawal request box.
//!
//! Coins leaving the sidechain for a mainchain P2PKH destination. The owner
//! type is fixed, so the proposition is written without a type tag.
//!
//! Layout: `[pub key hash: 20][value: i64 LE][nonce: u64 LE]`

use core::any::Any;

use crate::boxes::{read_amount, write_amount, BoxSerializer, LedgerBox};
use crate::codec::{Reader, Writer};
use crate::error::Result;
use crate::proposition::{
    MCPublicKeyHashProposition, MCPublicKeyHashPropositionSerializer, Proposition,
    PropositionSerializer,
};
use crate::registry::SerializerRegistry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawalRequestBox {
    proposition: MCPublicKeyHashProposition,
    value: i64,
    nonce: u64,
}

impl WithdrawalRequestBox {
    pub fn new(proposition: MCPublicKeyHashProposition, value: i64, nonce: u64) -> Self {
        Self { proposition, value, nonce }
    }

    pub fn destination(&self) -> &MCPublicKeyHashProposition {
        &self.proposition
    }
}

impl LedgerBox for WithdrawalRequestBox {
    fn proposition(&self) -> &dyn Proposition {
        &self.proposition
    }

    fn value(&self) -> i64 {
        self.value
    }

    fn nonce(&self) -> u64 {
        self.nonce
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn LedgerBox> {
        Box::new(self.clone())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WithdrawalRequestBoxSerializer;

impl BoxSerializer for WithdrawalRequestBoxSerializer {
    type Value = WithdrawalRequestBox;

    fn serialize(
        &self,
        ledger_box: &WithdrawalRequestBox,
        _registry: &SerializerRegistry,
        writer: &mut dyn Writer,
    ) -> Result<()> {
        MCPublicKeyHashPropositionSerializer.serialize(&ledger_box.proposition, writer);
        write_amount(writer, "withdrawal value", ledger_box.value)?;
        writer.put_u64(ledger_box.nonce);
        Ok(())
    }

    fn parse(
        &self,
        _registry: &SerializerRegistry,
        reader: &mut Reader<'_>,
    ) -> Result<WithdrawalRequestBox> {
        let proposition = MCPublicKeyHashPropositionSerializer.parse(reader)?;
        let value = read_amount(reader, "withdrawal value")?;
        let nonce = reader.get_u64()?;
        Ok(WithdrawalRequestBox { proposition, value, nonce })
    }
}
