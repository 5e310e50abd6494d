// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Box Ledger - reference pipeline
//!
//! Tracks the open (unspent) boxes of the sidechain and applies transactions
//! against them:
//! 1. Every input references an open box
//! 2. No input spends a box twice
//! 3. Inputs cover outputs plus fee
//! 4. Output ids are fresh
//! 5. State updated
//!
//! If ANY check fails the transaction is rejected and the ledger is unchanged.
//!
//! The ledger is owned by a single worker task; the gateway talks to it
//! through [`LedgerPipeline`], one request at a time.

use std::fmt;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use rustc_hash::{FxHashMap, FxHashSet};
use sidechain_ledger::boxes::LedgerBox;
use sidechain_ledger::error::LedgerError;
use sidechain_ledger::types::BoxId;
use sidechain_ledger::SerializerRegistry;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::errors::PipelineError;
use crate::pipeline::{PendingTransaction, TransactionPipeline};

pub struct BoxLedger {
    registry: Arc<SerializerRegistry>,
    open: FxHashMap<BoxId, Box<dyn LedgerBox>>,
    closed: FxHashSet<BoxId>,
}

impl fmt::Debug for BoxLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxLedger")
            .field("open", &self.open.len())
            .field("closed", &self.closed.len())
            .finish()
    }
}

impl BoxLedger {
    pub fn new(registry: Arc<SerializerRegistry>) -> Self {
        Self {
            registry,
            open: FxHashMap::default(),
            closed: FxHashSet::default(),
        }
    }

    /// Ledger whose open set is exactly `boxes`. Their values must sum
    /// within `i64`.
    pub fn with_genesis(
        registry: Arc<SerializerRegistry>,
        boxes: Vec<Box<dyn LedgerBox>>,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Self::new(registry);
        for b in boxes {
            let id = ledger.registry.box_id(b.as_ref())?;
            if ledger.open.insert(id, b).is_some() {
                return Err(LedgerError::InvalidValue(format!("duplicate genesis box {}", id)));
            }
        }
        if ledger.total_value().is_none() {
            return Err(LedgerError::InvalidValue("genesis values overflow i64".into()));
        }
        Ok(ledger)
    }

    pub fn open_box(&self, id: &BoxId) -> Option<&dyn LedgerBox> {
        self.open.get(id).map(|b| b.as_ref())
    }

    pub fn is_spent(&self, id: &BoxId) -> bool {
        self.closed.contains(id)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Sum of all open box values, `None` on overflow.
    pub fn total_value(&self) -> Option<i64> {
        self.open
            .values()
            .try_fold(0i64, |acc, b| acc.checked_add(b.value()))
    }

    /// Validates `pending` against the open set and applies it atomically.
    ///
    /// Returns the ids of the boxes it created.
    pub fn apply(&mut self, pending: &PendingTransaction) -> Result<Vec<BoxId>, PipelineError> {
        let tx = pending.transaction.as_ref();

        let mut available: i64 = 0;
        let mut seen = FxHashSet::default();
        for (index, input) in tx.inputs().iter().enumerate() {
            if !seen.insert(input.box_id) {
                return Err(PipelineError::Rejected(format!(
                    "input {} spends box {} a second time",
                    index, input.box_id
                )));
            }
            if self.closed.contains(&input.box_id) {
                return Err(PipelineError::Rejected(format!(
                    "input {} spends closed box {}",
                    index, input.box_id
                )));
            }
            let Some(spent) = self.open.get(&input.box_id) else {
                return Err(PipelineError::Rejected(format!(
                    "input {} references unknown box {}",
                    index, input.box_id
                )));
            };
            // Proof verification is signature-scheme specific; only require one.
            if input.proof.is_empty() {
                return Err(PipelineError::Rejected(format!("input {} carries no proof", index)));
            }
            available = available
                .checked_add(spent.value())
                .ok_or_else(|| PipelineError::Rejected("input value overflow".into()))?;
        }

        let required = tx
            .required_input_value()
            .map_err(|e| PipelineError::Rejected(e.to_string()))?;
        if available < required {
            return Err(PipelineError::Rejected(format!(
                "inputs hold {} but outputs plus fee need {}",
                available, required
            )));
        }

        let mut created = Vec::with_capacity(tx.outputs().len());
        for output in tx.outputs() {
            let id = self
                .registry
                .box_id(output.as_ref())
                .map_err(|e| PipelineError::Rejected(e.to_string()))?;
            if self.open.contains_key(&id) || self.closed.contains(&id) || created.contains(&id) {
                return Err(PipelineError::Rejected(format!("output box {} already exists", id)));
            }
            created.push(id);
        }

        // Commit boundary: nothing above touched the ledger.
        for input in tx.inputs() {
            self.open.remove(&input.box_id);
            self.closed.insert(input.box_id);
        }
        for (id, output) in created.iter().zip(tx.outputs()) {
            self.open.insert(*id, output.clone());
        }
        Ok(created)
    }
}

struct LedgerRequest {
    pending: PendingTransaction,
    reply: oneshot::Sender<Result<(), PipelineError>>,
}

/// [`TransactionPipeline`] that serializes transactions into a [`BoxLedger`]
/// owned by a background task.
#[derive(Clone)]
pub struct LedgerPipeline {
    sender: mpsc::Sender<LedgerRequest>,
}

impl LedgerPipeline {
    /// Starts the worker. The handle yields the ledger once every pipeline
    /// clone has been dropped.
    pub fn spawn(mut ledger: BoxLedger, queue_capacity: usize) -> (Self, JoinHandle<BoxLedger>) {
        let (sender, mut receiver) = mpsc::channel::<LedgerRequest>(queue_capacity.max(1));
        let worker = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let result = ledger.apply(&request.pending);
                match &result {
                    Ok(created) => tracing::debug!(
                        "Applied tx {} ({} boxes created, {} open)",
                        request.pending.id,
                        created.len(),
                        ledger.open_count()
                    ),
                    Err(e) => tracing::debug!("Rejected tx {}: {}", request.pending.id, e),
                }
                // The submitter may have timed out and gone away.
                let _ = request.reply.send(result.map(|_| ()));
            }
            tracing::info!("Ledger worker stopped");
            ledger
        });
        (Self { sender }, worker)
    }
}

impl TransactionPipeline for LedgerPipeline {
    fn process(&self, pending: PendingTransaction) -> BoxFuture<'static, Result<(), PipelineError>> {
        let sender = self.sender.clone();
        async move {
            let (reply, response) = oneshot::channel();
            sender
                .send(LedgerRequest { pending, reply })
                .await
                .map_err(|_| PipelineError::Unavailable("ledger worker stopped".into()))?;
            response
                .await
                .map_err(|_| PipelineError::Unavailable("ledger worker dropped the request".into()))?
        }
        .boxed()
    }
}
