// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Serializer Registry
//!
//! Resolves polymorphism on the wire. Every concrete proposition, box and
//! transaction type is registered once under a compact tag; encoding writes the
//! tag of the value's runtime type followed by its payload, decoding reads the
//! tag and dispatches to the matching serializer.
//!
//! # Lifecycle
//! Registration happens on a [`SerializerRegistryBuilder`]. `build()` freezes
//! it into a [`SerializerRegistry`] that has no mutating API, so it can be
//! shared across threads behind an `Arc` without locking.
//!
//! # Reader Position
//! `read_*` operations are transactional: on any error (unknown tag,
//! truncation, invalid value) the reader is reset to where the call started.
//! A node receiving an unknown box type can therefore reject the entity and
//! still know exactly where its input stands.
//!
//! `write_*` operations are all-or-nothing in the same way: an entity is
//! encoded into a scratch buffer and only reaches the caller's writer once it
//! encoded completely.

use core::any::{type_name, Any, TypeId};
use std::sync::Arc;

use crate::boxes::{BoxSerializer, LedgerBox};
use crate::codec::{Reader, Writer};
use crate::error::{EntityFamily, LedgerError, Result, TypeKey};
use crate::hash::digest;
use crate::proposition::{Proposition, PropositionSerializer};
use crate::transaction::{Transaction, TransactionSerializer};
use crate::types::{BoxId, TransactionId, TypeTag};

mod family;
pub mod global;
pub mod standard;

use family::{Entry, Family};

pub use global::{global, install};

/// Frozen dispatch tables for the three entity families.
pub struct SerializerRegistry {
    propositions: Family<dyn Proposition>,
    boxes: Family<dyn LedgerBox>,
    transactions: Family<dyn Transaction>,
}

/// Mutable registration phase of a [`SerializerRegistry`].
pub struct SerializerRegistryBuilder {
    inner: SerializerRegistry,
}

fn downcast<'a, T: Any>(value: &'a dyn Any, family: EntityFamily, name: &'static str) -> Result<&'a T> {
    value.downcast_ref::<T>().ok_or(LedgerError::UnregisteredType {
        family,
        key: TypeKey::Type(name),
    })
}

/// Runs `f` and rewinds the reader if it fails.
fn rewind_on_error<'a, T>(
    reader: &mut Reader<'a>,
    f: impl FnOnce(&mut Reader<'a>) -> Result<T>,
) -> Result<T> {
    let mark = reader.mark();
    let result = f(reader);
    if result.is_err() {
        reader.reset(mark);
    }
    result
}

/// Decodes one entity that must span the whole buffer.
fn decode_exact<T>(bytes: &[u8], f: impl FnOnce(&mut Reader<'_>) -> Result<T>) -> Result<T> {
    let mut reader = Reader::new(bytes);
    let value = f(&mut reader)?;
    if !reader.is_empty() {
        return Err(LedgerError::InvalidValue(format!(
            "{} trailing bytes after entity",
            reader.remaining()
        )));
    }
    Ok(value)
}

impl SerializerRegistryBuilder {
    pub fn new() -> Self {
        Self {
            inner: SerializerRegistry {
                propositions: Family::new(EntityFamily::Proposition),
                boxes: Family::new(EntityFamily::Box),
                transactions: Family::new(EntityFamily::Transaction),
            },
        }
    }

    pub fn register_proposition<S: PropositionSerializer>(
        &mut self,
        tag: TypeTag,
        serializer: S,
    ) -> Result<&mut Self> {
        let serializer = Arc::new(serializer);
        let parser = Arc::clone(&serializer);
        let entry = Entry {
            type_name: type_name::<S::Value>(),
            encode: Box::new(
                move |value: &dyn Proposition, _: &SerializerRegistry, writer: &mut dyn Writer| -> Result<()> {
                    let concrete = downcast::<S::Value>(
                        value.as_any(),
                        EntityFamily::Proposition,
                        value.type_name(),
                    )?;
                    serializer.serialize(concrete, writer);
                    Ok(())
                },
            ),
            encode_message: None,
            decode: Box::new(
                move |_: &SerializerRegistry, reader: &mut Reader<'_>| -> Result<Box<dyn Proposition>> {
                    Ok(Box::new(parser.parse(reader)?))
                },
            ),
        };
        self.inner
            .propositions
            .insert(tag, TypeId::of::<S::Value>(), entry)?;
        Ok(self)
    }

    pub fn register_box<S: BoxSerializer>(&mut self, tag: TypeTag, serializer: S) -> Result<&mut Self> {
        let serializer = Arc::new(serializer);
        let parser = Arc::clone(&serializer);
        let entry = Entry {
            type_name: type_name::<S::Value>(),
            encode: Box::new(
                move |value: &dyn LedgerBox, registry: &SerializerRegistry, writer: &mut dyn Writer| -> Result<()> {
                    let concrete =
                        downcast::<S::Value>(value.as_any(), EntityFamily::Box, value.type_name())?;
                    serializer.serialize(concrete, registry, writer)
                },
            ),
            encode_message: None,
            decode: Box::new(
                move |registry: &SerializerRegistry, reader: &mut Reader<'_>| -> Result<Box<dyn LedgerBox>> {
                    Ok(Box::new(parser.parse(registry, reader)?))
                },
            ),
        };
        self.inner.boxes.insert(tag, TypeId::of::<S::Value>(), entry)?;
        Ok(self)
    }

    pub fn register_transaction<S: TransactionSerializer>(
        &mut self,
        tag: TypeTag,
        serializer: S,
    ) -> Result<&mut Self> {
        let serializer = Arc::new(serializer);
        let signer_view = Arc::clone(&serializer);
        let parser = Arc::clone(&serializer);
        let entry = Entry {
            type_name: type_name::<S::Value>(),
            encode: Box::new(
                move |value: &dyn Transaction, registry: &SerializerRegistry, writer: &mut dyn Writer| -> Result<()> {
                    let concrete = downcast::<S::Value>(
                        value.as_any(),
                        EntityFamily::Transaction,
                        value.type_name(),
                    )?;
                    serializer.serialize(concrete, registry, writer)
                },
            ),
            encode_message: Some(Box::new(
                move |value: &dyn Transaction, registry: &SerializerRegistry, writer: &mut dyn Writer| -> Result<()> {
                    let concrete = downcast::<S::Value>(
                        value.as_any(),
                        EntityFamily::Transaction,
                        value.type_name(),
                    )?;
                    signer_view.serialize_message_to_sign(concrete, registry, writer)
                },
            )),
            decode: Box::new(
                move |registry: &SerializerRegistry, reader: &mut Reader<'_>| -> Result<Box<dyn Transaction>> {
                    Ok(Box::new(parser.parse(registry, reader)?))
                },
            ),
        };
        self.inner
            .transactions
            .insert(tag, TypeId::of::<S::Value>(), entry)?;
        Ok(self)
    }

    /// Ends the registration phase.
    pub fn build(self) -> SerializerRegistry {
        self.inner
    }
}

impl Default for SerializerRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SerializerRegistry {
    pub fn builder() -> SerializerRegistryBuilder {
        SerializerRegistryBuilder::new()
    }

    fn write_entity<O: ?Sized>(
        &self,
        family: &Family<O>,
        value: &O,
        runtime_type: (TypeId, &'static str),
        writer: &mut dyn Writer,
    ) -> Result<()> {
        let (tag, entry) = family.by_type(runtime_type.0, runtime_type.1)?;
        let mut scratch = vec![tag.0];
        (entry.encode)(value, self, &mut scratch)?;
        writer.put_bytes(&scratch);
        Ok(())
    }

    fn read_entity<O: ?Sized>(&self, family: &Family<O>, reader: &mut Reader<'_>) -> Result<Box<O>> {
        rewind_on_error(reader, |reader| {
            let tag = TypeTag(reader.get_u8()?);
            let entry = family.by_tag(tag)?;
            (entry.decode)(self, reader)
        })
    }

    // --- Propositions ---

    pub fn write_proposition(&self, proposition: &dyn Proposition, writer: &mut dyn Writer) -> Result<()> {
        let runtime_type = (proposition.as_any().type_id(), proposition.type_name());
        self.write_entity(&self.propositions, proposition, runtime_type, writer)
    }

    pub fn read_proposition(&self, reader: &mut Reader<'_>) -> Result<Box<dyn Proposition>> {
        self.read_entity(&self.propositions, reader)
    }

    pub fn encode_proposition(&self, proposition: &dyn Proposition) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_proposition(proposition, &mut out)?;
        Ok(out)
    }

    pub fn decode_proposition(&self, bytes: &[u8]) -> Result<Box<dyn Proposition>> {
        decode_exact(bytes, |reader| self.read_proposition(reader))
    }

    // --- Boxes ---

    pub fn write_box(&self, ledger_box: &dyn LedgerBox, writer: &mut dyn Writer) -> Result<()> {
        let runtime_type = (ledger_box.as_any().type_id(), ledger_box.type_name());
        self.write_entity(&self.boxes, ledger_box, runtime_type, writer)
    }

    pub fn read_box(&self, reader: &mut Reader<'_>) -> Result<Box<dyn LedgerBox>> {
        self.read_entity(&self.boxes, reader)
    }

    pub fn encode_box(&self, ledger_box: &dyn LedgerBox) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_box(ledger_box, &mut out)?;
        Ok(out)
    }

    pub fn decode_box(&self, bytes: &[u8]) -> Result<Box<dyn LedgerBox>> {
        decode_exact(bytes, |reader| self.read_box(reader))
    }

    /// BLAKE3 of the tag-framed box encoding.
    pub fn box_id(&self, ledger_box: &dyn LedgerBox) -> Result<BoxId> {
        digest(|writer| self.write_box(ledger_box, writer)).map(BoxId)
    }

    // --- Transactions ---

    pub fn write_transaction(&self, transaction: &dyn Transaction, writer: &mut dyn Writer) -> Result<()> {
        let runtime_type = (transaction.as_any().type_id(), transaction.type_name());
        self.write_entity(&self.transactions, transaction, runtime_type, writer)
    }

    pub fn read_transaction(&self, reader: &mut Reader<'_>) -> Result<Box<dyn Transaction>> {
        self.read_entity(&self.transactions, reader)
    }

    pub fn encode_transaction(&self, transaction: &dyn Transaction) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_transaction(transaction, &mut out)?;
        Ok(out)
    }

    pub fn decode_transaction(&self, bytes: &[u8]) -> Result<Box<dyn Transaction>> {
        decode_exact(bytes, |reader| self.read_transaction(reader))
    }

    pub fn write_message_to_sign(&self, transaction: &dyn Transaction, writer: &mut dyn Writer) -> Result<()> {
        let (tag, entry) = self
            .transactions
            .by_type(transaction.as_any().type_id(), transaction.type_name())?;
        let mut scratch = vec![tag.0];
        match &entry.encode_message {
            Some(encode) => encode(transaction, self, &mut scratch)?,
            None => (entry.encode)(transaction, self, &mut scratch)?,
        }
        writer.put_bytes(&scratch);
        Ok(())
    }

    /// Tag-framed encoding without proofs; what wallets sign.
    pub fn message_to_sign(&self, transaction: &dyn Transaction) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_message_to_sign(transaction, &mut out)?;
        Ok(out)
    }

    pub fn transaction_id(&self, transaction: &dyn Transaction) -> Result<TransactionId> {
        digest(|writer| self.write_message_to_sign(transaction, writer)).map(TransactionId)
    }

    // --- Introspection ---

    pub fn is_registered(&self, family: EntityFamily, tag: TypeTag) -> bool {
        match family {
            EntityFamily::Proposition => self.propositions.contains_tag(tag),
            EntityFamily::Box => self.boxes.contains_tag(tag),
            EntityFamily::Transaction => self.transactions.contains_tag(tag),
        }
    }

    pub fn registered_tags(&self, family: EntityFamily) -> Vec<TypeTag> {
        match family {
            EntityFamily::Proposition => self.propositions.tags(),
            EntityFamily::Box => self.boxes.tags(),
            EntityFamily::Transaction => self.transactions.tags(),
        }
    }
}
