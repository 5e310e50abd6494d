// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Spendable ledger entries.
//!
//! A box is fully described by its concrete type, owner proposition, value and
//! nonce. Its identifier is derived from those four through the registry, see
//! [`SerializerRegistry::box_id`].

use core::any::Any;
use core::fmt;

use crate::codec::{Reader, Writer};
use crate::error::{LedgerError, Result};
use crate::proposition::Proposition;
use crate::registry::SerializerRegistry;

pub mod withdrawal_request;
pub mod zen_box;

pub use withdrawal_request::{WithdrawalRequestBox, WithdrawalRequestBoxSerializer};
pub use zen_box::{ZenBox, ZenBoxSerializer};

pub trait LedgerBox: Any + fmt::Debug + Send + Sync {
    /// Owner of the box.
    fn proposition(&self) -> &dyn Proposition;

    /// Amount locked in the box. Signed so that invalid amounts stay
    /// representable until they reach the codec, which rejects them.
    fn value(&self) -> i64;

    fn nonce(&self) -> u64;

    fn as_any(&self) -> &dyn Any;

    fn clone_box(&self) -> Box<dyn LedgerBox>;

    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl PartialEq for dyn LedgerBox {
    fn eq(&self, other: &Self) -> bool {
        self.as_any().type_id() == other.as_any().type_id()
            && self.proposition() == other.proposition()
            && self.value() == other.value()
            && self.nonce() == other.nonce()
    }
}

impl Eq for dyn LedgerBox {}

impl Clone for Box<dyn LedgerBox> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Serializer for one concrete box type.
///
/// The registry is handed in so polymorphic nested fields (the owner) can be
/// resolved through the same dispatch table.
pub trait BoxSerializer: Send + Sync + 'static {
    type Value: LedgerBox;

    fn serialize(
        &self,
        ledger_box: &Self::Value,
        registry: &SerializerRegistry,
        writer: &mut dyn Writer,
    ) -> Result<()>;

    fn parse(&self, registry: &SerializerRegistry, reader: &mut Reader<'_>) -> Result<Self::Value>;
}

/// Writes a monetary amount, refusing negative values.
pub fn write_amount(writer: &mut dyn Writer, field: &str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(LedgerError::InvalidValue(format!(
            "{} must be non-negative, got {}",
            field, value
        )));
    }
    writer.put_i64(value);
    Ok(())
}

pub fn read_amount(reader: &mut Reader<'_>, field: &str) -> Result<i64> {
    let mark = reader.mark();
    let value = reader.get_i64()?;
    if value < 0 {
        reader.reset(mark);
        return Err(LedgerError::InvalidValue(format!(
            "{} must be non-negative, got {}",
            field, value
        )));
    }
    Ok(value)
}
