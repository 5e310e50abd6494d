// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Process-wide registry, installed once at startup.

use std::sync::{Arc, OnceLock};

use crate::error::{LedgerError, Result};
use crate::registry::SerializerRegistry;

static GLOBAL_REGISTRY: OnceLock<Arc<SerializerRegistry>> = OnceLock::new();

/// Installs the registry every component of this process will share.
///
/// Fails if one is already installed; the first registry stays in place.
pub fn install(registry: SerializerRegistry) -> Result<Arc<SerializerRegistry>> {
    let registry = Arc::new(registry);
    GLOBAL_REGISTRY
        .set(Arc::clone(&registry))
        .map_err(|_| LedgerError::RegistryAlreadyInstalled)?;
    Ok(registry)
}

pub fn global() -> Option<Arc<SerializerRegistry>> {
    GLOBAL_REGISTRY.get().cloned()
}
