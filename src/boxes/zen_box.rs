// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Regular coin box.

use core::any::Any;

use crate::boxes::{read_amount, write_amount, BoxSerializer, LedgerBox};
use crate::codec::{Reader, Writer};
use crate::error::Result;
use crate::proposition::Proposition;
use crate::registry::SerializerRegistry;

/// Coins owned by any registered proposition type.
///
/// Layout: `[owner tag][owner payload][value: i64 LE][nonce: u64 LE]`
#[derive(Clone, Debug)]
pub struct ZenBox {
    proposition: Box<dyn Proposition>,
    value: i64,
    nonce: u64,
}

impl PartialEq for ZenBox {
    fn eq(&self, other: &Self) -> bool {
        *self.proposition == *other.proposition
            && self.value == other.value
            && self.nonce == other.nonce
    }
}

impl Eq for ZenBox {}

impl ZenBox {
    pub fn new(proposition: Box<dyn Proposition>, value: i64, nonce: u64) -> Self {
        Self { proposition, value, nonce }
    }
}

impl LedgerBox for ZenBox {
    fn proposition(&self) -> &dyn Proposition {
        self.proposition.as_ref()
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
pub struct ZenBoxSerializer;

impl BoxSerializer for ZenBoxSerializer {
    type Value = ZenBox;

    fn serialize(
        &self,
        ledger_box: &ZenBox,
        registry: &SerializerRegistry,
        writer: &mut dyn Writer,
    ) -> Result<()> {
        registry.write_proposition(ledger_box.proposition.as_ref(), writer)?;
        write_amount(writer, "box value", ledger_box.value)?;
        writer.put_u64(ledger_box.nonce);
        Ok(())
    }

    fn parse(&self, registry: &SerializerRegistry, reader: &mut Reader<'_>) -> Result<ZenBox> {
        let proposition = registry.read_proposition(reader)?;
        let value = read_amount(reader, "box value")?;
        let nonce = reader.get_u64()?;
        Ok(ZenBox { proposition, value, nonce })
    }
}
