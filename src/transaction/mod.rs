// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transactions.
//!
//! # Identifier Rule
//! The transaction id is the BLAKE3 hash of the *message to sign*: the
//! tag-framed canonical encoding with every input proof left out. Proofs sign
//! the id, so replacing a proof never changes it.

use core::any::Any;
use core::fmt;

use rustc_hash::FxHashSet;

use crate::boxes::LedgerBox;
use crate::codec::{Reader, Writer};
use crate::config::MAX_PROOF_SIZE;
use crate::error::{LedgerError, Result};
use crate::registry::SerializerRegistry;
use crate::types::BoxId;

pub mod regular;

pub use regular::{RegularTransaction, RegularTransactionSerializer};

/// Reference to a spent box plus the data unlocking its proposition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Input {
    pub box_id: BoxId,
    pub proof: Vec<u8>,
}

impl Input {
    pub fn new(box_id: BoxId, proof: Vec<u8>) -> Self {
        Self { box_id, proof }
    }
}

pub trait Transaction: Any + fmt::Debug + Send + Sync {
    fn version(&self) -> u8;

    /// Spent boxes, in signing order.
    fn inputs(&self) -> &[Input];

    /// Created boxes, in creation order.
    fn outputs(&self) -> &[Box<dyn LedgerBox>];

    fn fee(&self) -> i64;

    fn as_any(&self) -> &dyn Any;

    fn clone_transaction(&self) -> Box<dyn Transaction>;

    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    fn unlocked_box_ids(&self) -> Vec<BoxId> {
        self.inputs().iter().map(|input| input.box_id).collect()
    }

    /// Sum of output values, failing on negative amounts or overflow.
    fn total_output_value(&self) -> Result<i64> {
        self.outputs().iter().try_fold(0i64, |acc, output| {
            if output.value() < 0 {
                return Err(LedgerError::InvalidValue(format!(
                    "output value must be non-negative, got {}",
                    output.value()
                )));
            }
            acc.checked_add(output.value())
                .ok_or_else(|| LedgerError::InvalidValue("output values overflow i64".into()))
        })
    }

    /// Outputs plus fee: the minimum the inputs have to cover.
    fn required_input_value(&self) -> Result<i64> {
        if self.fee() < 0 {
            return Err(LedgerError::InvalidValue(format!(
                "fee must be non-negative, got {}",
                self.fee()
            )));
        }
        self.total_output_value()?
            .checked_add(self.fee())
            .ok_or_else(|| LedgerError::InvalidValue("outputs plus fee overflow i64".into()))
    }

    /// Checks that need no ledger state: non-empty inputs and outputs, no box
    /// spent twice, proofs within bounds, amounts non-negative and summable.
    fn check_structure(&self) -> Result<()> {
        if self.inputs().is_empty() {
            return Err(LedgerError::InvalidValue("transaction has no inputs".into()));
        }
        if self.outputs().is_empty() {
            return Err(LedgerError::InvalidValue("transaction has no outputs".into()));
        }
        let mut seen = FxHashSet::default();
        for input in self.inputs() {
            if !seen.insert(input.box_id) {
                return Err(LedgerError::InvalidValue(format!(
                    "box {} is spent twice",
                    input.box_id
                )));
            }
            if input.proof.len() > MAX_PROOF_SIZE {
                return Err(LedgerError::InvalidValue(format!(
                    "proof of {} bytes exceeds {}",
                    input.proof.len(),
                    MAX_PROOF_SIZE
                )));
            }
        }
        self.required_input_value().map(|_| ())
    }
}

impl PartialEq for dyn Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.as_any().type_id() == other.as_any().type_id()
            && self.version() == other.version()
            && self.fee() == other.fee()
            && self.inputs() == other.inputs()
            && self.outputs() == other.outputs()
    }
}

impl Clone for Box<dyn Transaction> {
    fn clone(&self) -> Self {
        self.clone_transaction()
    }
}

/// Serializer for one concrete transaction type.
pub trait TransactionSerializer: Send + Sync + 'static {
    type Value: Transaction;

    fn serialize(
        &self,
        transaction: &Self::Value,
        registry: &SerializerRegistry,
        writer: &mut dyn Writer,
    ) -> Result<()>;

    /// Same layout as `serialize` minus anything the signatures cover.
    fn serialize_message_to_sign(
        &self,
        transaction: &Self::Value,
        registry: &SerializerRegistry,
        writer: &mut dyn Writer,
    ) -> Result<()>;

    fn parse(&self, registry: &SerializerRegistry, reader: &mut Reader<'_>) -> Result<Self::Value>;
}
