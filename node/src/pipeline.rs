// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Processing contract behind the submission gateway.
//!
//! The gateway only hands over transactions that passed structural checks and
//! encode cleanly. What happens next (mempool admission, state checks,
//! network propagation) is the pipeline's business; it reports back once.

use std::sync::Arc;

use futures::future::BoxFuture;
use sidechain_ledger::transaction::Transaction;
use sidechain_ledger::types::TransactionId;

use crate::errors::PipelineError;

/// A transaction that passed gateway validation.
#[derive(Clone, Debug)]
pub struct PendingTransaction {
    pub id: TransactionId,
    /// Tag-framed wire encoding, ready for propagation.
    pub bytes: Vec<u8>,
    pub transaction: Arc<dyn Transaction>,
}

pub trait TransactionPipeline: Send + Sync + 'static {
    /// Resolves once with the pipeline's verdict.
    ///
    /// `Rejected` means the transaction itself is unacceptable,
    /// `Unavailable` means it could not be processed at all.
    fn process(&self, pending: PendingTransaction) -> BoxFuture<'static, Result<(), PipelineError>>;
}
