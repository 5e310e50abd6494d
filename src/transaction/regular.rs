// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Regular coin transfer.
//!
//! # Wire Layout
//! ```text
//! version (u8)
//! fee (i64 LE, non-negative)
//! input count (varint)
//!   box id (32 bytes)
//!   proof (varint length + bytes)     <- omitted from the message to sign
//! output count (varint)
//!   box (tag + payload, via registry)
//! ```

use core::any::Any;

use crate::boxes::{read_amount, write_amount, LedgerBox};
use crate::codec::{Reader, Writer};
use crate::config::{BOX_ID_LEN, MAX_PROOF_SIZE, TRANSACTION_VERSION};
use crate::error::{LedgerError, Result};
use crate::registry::SerializerRegistry;
use crate::transaction::{Input, Transaction, TransactionSerializer};
use crate::types::BoxId;

#[derive(Clone, Debug, PartialEq)]
pub struct RegularTransaction {
    version: u8,
    inputs: Vec<Input>,
    outputs: Vec<Box<dyn LedgerBox>>,
    fee: i64,
}

impl RegularTransaction {
    pub fn new(inputs: Vec<Input>, outputs: Vec<Box<dyn LedgerBox>>, fee: i64) -> Self {
        Self {
            version: TRANSACTION_VERSION,
            inputs,
            outputs,
            fee,
        }
    }

    /// Replaces the proof of input `index`, e.g. once the wallet has signed the
    /// transaction id.
    pub fn set_proof(&mut self, index: usize, proof: Vec<u8>) -> Result<()> {
        let count = self.inputs.len();
        let input = self.inputs.get_mut(index).ok_or_else(|| {
            LedgerError::InvalidValue(format!("input {} out of range ({} inputs)", index, count))
        })?;
        input.proof = proof;
        Ok(())
    }
}

impl Transaction for RegularTransaction {
    fn version(&self) -> u8 {
        self.version
    }

    fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    fn outputs(&self) -> &[Box<dyn LedgerBox>] {
        &self.outputs
    }

    fn fee(&self) -> i64 {
        self.fee
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_transaction(&self) -> Box<dyn Transaction> {
        Box::new(self.clone())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RegularTransactionSerializer;

impl RegularTransactionSerializer {
    fn write(
        &self,
        tx: &RegularTransaction,
        registry: &SerializerRegistry,
        writer: &mut dyn Writer,
        with_proofs: bool,
    ) -> Result<()> {
        writer.put_u8(tx.version);
        write_amount(writer, "fee", tx.fee)?;

        writer.put_varint(tx.inputs.len() as u64);
        for input in &tx.inputs {
            writer.put_fixed(input.box_id.as_bytes(), BOX_ID_LEN)?;
            if with_proofs {
                if input.proof.len() > MAX_PROOF_SIZE {
                    return Err(LedgerError::InvalidValue(format!(
                        "proof of {} bytes exceeds {}",
                        input.proof.len(),
                        MAX_PROOF_SIZE
                    )));
                }
                writer.put_var_bytes(&input.proof);
            }
        }

        writer.put_varint(tx.outputs.len() as u64);
        for output in &tx.outputs {
            registry.write_box(output.as_ref(), writer)?;
        }
        Ok(())
    }
}

impl TransactionSerializer for RegularTransactionSerializer {
    type Value = RegularTransaction;

    fn serialize(
        &self,
        transaction: &RegularTransaction,
        registry: &SerializerRegistry,
        writer: &mut dyn Writer,
    ) -> Result<()> {
        self.write(transaction, registry, writer, true)
    }

    fn serialize_message_to_sign(
        &self,
        transaction: &RegularTransaction,
        registry: &SerializerRegistry,
        writer: &mut dyn Writer,
    ) -> Result<()> {
        self.write(transaction, registry, writer, false)
    }

    fn parse(
        &self,
        registry: &SerializerRegistry,
        reader: &mut Reader<'_>,
    ) -> Result<RegularTransaction> {
        let version = reader.get_u8()?;
        if version != TRANSACTION_VERSION {
            return Err(LedgerError::InvalidValue(format!(
                "unsupported transaction version {}",
                version
            )));
        }
        let fee = read_amount(reader, "fee")?;

        // Smallest input: box id plus a one-byte empty proof length.
        let input_count = reader.get_count(BOX_ID_LEN + 1)?;
        let mut inputs = Vec::with_capacity(input_count);
        for _ in 0..input_count {
            let box_id = BoxId(reader.get_array()?);
            let proof = reader.get_var_bytes()?;
            if proof.len() > MAX_PROOF_SIZE {
                return Err(LedgerError::InvalidValue(format!(
                    "proof of {} bytes exceeds {}",
                    proof.len(),
                    MAX_PROOF_SIZE
                )));
            }
            inputs.push(Input::new(box_id, proof.to_vec()));
        }

        // Every output carries at least its type tag.
        let output_count = reader.get_count(1)?;
        let mut outputs = Vec::with_capacity(output_count);
        for _ in 0..output_count {
            outputs.push(registry.read_box(reader)?);
        }

        Ok(RegularTransaction {
            version,
            inputs,
            outputs,
            fee,
        })
    }
}
