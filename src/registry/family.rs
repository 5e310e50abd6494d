// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Per-family dispatch table.

use core::any::TypeId;

use rustc_hash::FxHashMap;

use crate::codec::{Reader, Writer};
use crate::error::{EntityFamily, LedgerError, Result, TypeKey};
use crate::registry::SerializerRegistry;
use crate::types::TypeTag;

pub(crate) type EncodeFn<O> =
    Box<dyn Fn(&O, &SerializerRegistry, &mut dyn Writer) -> Result<()> + Send + Sync>;

pub(crate) type DecodeFn<O> =
    Box<dyn Fn(&SerializerRegistry, &mut Reader<'_>) -> Result<Box<O>> + Send + Sync>;

/// Type-erased serializer for one concrete type of a family.
pub(crate) struct Entry<O: ?Sized> {
    pub(crate) type_name: &'static str,
    pub(crate) encode: EncodeFn<O>,
    /// Alternate encoding, used by transactions for the message to sign.
    pub(crate) encode_message: Option<EncodeFn<O>>,
    pub(crate) decode: DecodeFn<O>,
}

/// Bidirectional map between wire tags and concrete Rust types.
pub(crate) struct Family<O: ?Sized> {
    kind: EntityFamily,
    tags: FxHashMap<TypeId, TypeTag>,
    entries: FxHashMap<TypeTag, Entry<O>>,
}

impl<O: ?Sized> Family<O> {
    pub(crate) fn new(kind: EntityFamily) -> Self {
        Self {
            kind,
            tags: FxHashMap::default(),
            entries: FxHashMap::default(),
        }
    }

    pub(crate) fn insert(&mut self, tag: TypeTag, type_id: TypeId, entry: Entry<O>) -> Result<()> {
        if self.entries.contains_key(&tag) {
            return Err(LedgerError::DuplicateRegistration {
                family: self.kind,
                key: TypeKey::Tag(tag.0),
            });
        }
        if self.tags.contains_key(&type_id) {
            return Err(LedgerError::DuplicateRegistration {
                family: self.kind,
                key: TypeKey::Type(entry.type_name),
            });
        }
        self.tags.insert(type_id, tag);
        self.entries.insert(tag, entry);
        Ok(())
    }

    /// Encoding side: runtime type to tag and serializer.
    pub(crate) fn by_type(&self, type_id: TypeId, type_name: &'static str) -> Result<(TypeTag, &Entry<O>)> {
        self.tags
            .get(&type_id)
            .and_then(|tag| self.entries.get(tag).map(|entry| (*tag, entry)))
            .ok_or(LedgerError::UnregisteredType {
                family: self.kind,
                key: TypeKey::Type(type_name),
            })
    }

    /// Decoding side: wire tag to serializer.
    pub(crate) fn by_tag(&self, tag: TypeTag) -> Result<&Entry<O>> {
        self.entries.get(&tag).ok_or(LedgerError::UnregisteredType {
            family: self.kind,
            key: TypeKey::Tag(tag.0),
        })
    }

    pub(crate) fn contains_tag(&self, tag: TypeTag) -> bool {
        self.entries.contains_key(&tag)
    }

    /// Registered tags in ascending order.
    pub(crate) fn tags(&self) -> Vec<TypeTag> {
        let mut tags: Vec<TypeTag> = self.entries.keys().copied().collect();
        tags.sort();
        tags
    }
}
