// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{NodeError, Result};

pub const ENV_SUBMIT_TIMEOUT_MS: &str = "SIDECHAIN_SUBMIT_TIMEOUT_MS";
pub const ENV_QUEUE_CAPACITY: &str = "SIDECHAIN_QUEUE_CAPACITY";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Deadline for the pipeline to answer a submission.
    pub submit_timeout_ms: u64,
    /// Pending requests buffered in front of the ledger worker.
    pub queue_capacity: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            submit_timeout_ms: 5_000,
            queue_capacity: 1024,
        }
    }
}

impl GatewayConfig {
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| NodeError::Config(e.to_string()))?;
        cfg.validate()
    }

    /// Defaults overridden by `SIDECHAIN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(ENV_SUBMIT_TIMEOUT_MS) {
            self.submit_timeout_ms = parse_var(ENV_SUBMIT_TIMEOUT_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_QUEUE_CAPACITY) {
            self.queue_capacity = parse_var(ENV_QUEUE_CAPACITY, &raw)?;
        }
        self.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.submit_timeout_ms == 0 {
            return Err(NodeError::Config("submit_timeout_ms must be positive".into()));
        }
        if self.queue_capacity == 0 {
            return Err(NodeError::Config("queue_capacity must be positive".into()));
        }
        Ok(self)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| NodeError::Config(format!("{} has invalid value {:?}", key, raw)))
}
