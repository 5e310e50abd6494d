// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use core::fmt;
use thiserror::Error;

/// The three polymorphic entity families the registry dispatches over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityFamily {
    Proposition,
    Box,
    Transaction,
}

impl fmt::Display for EntityFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityFamily::Proposition => f.write_str("proposition"),
            EntityFamily::Box => f.write_str("box"),
            EntityFamily::Transaction => f.write_str("transaction"),
        }
    }
}

/// How a type was looked up in the registry: by wire tag or by Rust type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKey {
    Tag(u8),
    Type(&'static str),
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKey::Tag(tag) => write!(f, "tag {}", tag),
            TypeKey::Type(name) => write!(f, "type {}", name),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("Unregistered {family} {key}")]
    UnregisteredType { family: EntityFamily, key: TypeKey },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Duplicate {family} registration for {key}")]
    DuplicateRegistration { family: EntityFamily, key: TypeKey },

    #[error("A process-wide serializer registry is already installed")]
    RegistryAlreadyInstalled,
}

impl LedgerError {
    pub fn is_truncated(&self) -> bool {
        matches!(self, LedgerError::Truncated { .. })
    }

    pub fn is_unregistered(&self) -> bool {
        matches!(self, LedgerError::UnregisteredType { .. })
    }

    pub fn is_invalid_value(&self) -> bool {
        matches!(self, LedgerError::InvalidValue(_))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
