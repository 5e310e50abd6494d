// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Submission Gateway
//!
//! Entry point for wallets and APIs handing a transaction to the node.
//! `submit` never blocks and never fails directly: every submission resolves
//! exactly once, through the returned [`SubmissionHandle`] or a callback,
//! with either the accepted transaction id or a [`SubmissionError`].
//!
//! # Flow
//! 1. Structural checks (inputs, outputs, amounts, proof sizes)
//! 2. Canonical encoding and id through the registry
//! 3. Hand-off to the [`TransactionPipeline`], bounded by the submit timeout
//!
//! Failures in 1-2 and pipeline rejections are validation failures. Pipeline
//! unavailability, timeouts and a lost worker are propagation failures.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use serde::Serialize;
use sidechain_ledger::transaction::Transaction;
use sidechain_ledger::types::TransactionId;
use sidechain_ledger::SerializerRegistry;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use crate::config::GatewayConfig;
use crate::errors::{NodeError, Result, SubmissionError};
use crate::pipeline::{PendingTransaction, TransactionPipeline};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SubmissionOutcome {
    Accepted { id: TransactionId },
    Rejected(SubmissionError),
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted { .. })
    }

    pub fn id(&self) -> Option<TransactionId> {
        match self {
            SubmissionOutcome::Accepted { id } => Some(*id),
            SubmissionOutcome::Rejected(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SubmissionError> {
        match self {
            SubmissionOutcome::Accepted { .. } => None,
            SubmissionOutcome::Rejected(e) => Some(e),
        }
    }
}

/// Resolves to the outcome of one submission.
///
/// Dropping the handle does not cancel the submission.
#[derive(Debug)]
pub struct SubmissionHandle {
    receiver: oneshot::Receiver<SubmissionOutcome>,
}

impl Future for SubmissionHandle {
    type Output = SubmissionOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx).map(|received| {
            received.unwrap_or_else(|_| {
                SubmissionOutcome::Rejected(SubmissionError::PropagationFailure(
                    "submission task ended without an outcome".into(),
                ))
            })
        })
    }
}

pub struct TransactionSubmitter {
    registry: Arc<SerializerRegistry>,
    pipeline: Arc<dyn TransactionPipeline>,
    config: GatewayConfig,
    runtime: Handle,
}

impl TransactionSubmitter {
    /// Binds the submitter to the current tokio runtime.
    pub fn new(
        registry: Arc<SerializerRegistry>,
        pipeline: Arc<dyn TransactionPipeline>,
        config: GatewayConfig,
    ) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| NodeError::Runtime(e.to_string()))?;
        Ok(Self::with_runtime(registry, pipeline, config, runtime))
    }

    pub fn with_runtime(
        registry: Arc<SerializerRegistry>,
        pipeline: Arc<dyn TransactionPipeline>,
        config: GatewayConfig,
        runtime: Handle,
    ) -> Self {
        Self {
            registry,
            pipeline,
            config,
            runtime,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn submit(&self, transaction: Box<dyn Transaction>) -> SubmissionHandle {
        let (sender, receiver) = oneshot::channel();
        let registry = Arc::clone(&self.registry);
        let pipeline = Arc::clone(&self.pipeline);
        let timeout = self.config.submit_timeout();

        metrics::increment_counter!("sidechain_tx_submitted_total");
        self.runtime.spawn(async move {
            let started = Instant::now();
            let outcome = process(&registry, pipeline.as_ref(), timeout, transaction).await;
            record(&outcome, started.elapsed());
            // Nobody may be waiting any more.
            let _ = sender.send(outcome);
        });
        SubmissionHandle { receiver }
    }

    /// Like [`submit`](Self::submit), delivering the outcome to `callback`
    /// exactly once.
    ///
    /// If the runtime drops the delivery task (e.g. it is shutting down), the
    /// callback receives a `PropagationFailure` on the dropping thread.
    pub fn submit_with_callback<F>(&self, transaction: Box<dyn Transaction>, callback: F)
    where
        F: FnOnce(SubmissionOutcome) + Send + 'static,
    {
        let delivery = CallbackOnce::new(callback);
        let handle = self.submit(transaction);
        self.runtime.spawn(async move {
            delivery.fire(handle.await);
        });
    }
}

/// Owns a result callback; fires it from `Drop` if nobody did.
struct CallbackOnce<F: FnOnce(SubmissionOutcome)> {
    callback: Option<F>,
}

impl<F: FnOnce(SubmissionOutcome)> CallbackOnce<F> {
    fn new(callback: F) -> Self {
        Self { callback: Some(callback) }
    }

    fn fire(mut self, outcome: SubmissionOutcome) {
        if let Some(callback) = self.callback.take() {
            callback(outcome);
        }
    }
}

impl<F: FnOnce(SubmissionOutcome)> Drop for CallbackOnce<F> {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback(SubmissionOutcome::Rejected(SubmissionError::PropagationFailure(
                "submission dropped before an outcome was delivered".into(),
            )));
        }
    }
}

async fn process(
    registry: &SerializerRegistry,
    pipeline: &dyn TransactionPipeline,
    timeout: Duration,
    transaction: Box<dyn Transaction>,
) -> SubmissionOutcome {
    let prepared = transaction.check_structure().and_then(|_| {
        let id = registry.transaction_id(transaction.as_ref())?;
        let bytes = registry.encode_transaction(transaction.as_ref())?;
        Ok((id, bytes))
    });
    let (id, bytes) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => return SubmissionOutcome::Rejected(e.into()),
    };

    tracing::debug!("Submitting tx {} ({} bytes)", id, bytes.len());
    let pending = PendingTransaction {
        id,
        bytes,
        transaction: Arc::from(transaction),
    };

    match tokio::time::timeout(timeout, pipeline.process(pending)).await {
        Ok(Ok(())) => SubmissionOutcome::Accepted { id },
        Ok(Err(e)) => SubmissionOutcome::Rejected(e.into()),
        Err(_) => SubmissionOutcome::Rejected(SubmissionError::PropagationFailure(format!(
            "pipeline did not answer within {:?}",
            timeout
        ))),
    }
}

fn record(outcome: &SubmissionOutcome, elapsed: Duration) {
    metrics::histogram!("sidechain_tx_processing_seconds", elapsed.as_secs_f64());
    match outcome {
        SubmissionOutcome::Accepted { id } => {
            metrics::increment_counter!("sidechain_tx_accepted_total");
            tracing::info!("Transaction {} accepted", id);
        }
        SubmissionOutcome::Rejected(e @ SubmissionError::ValidationFailure(_)) => {
            metrics::increment_counter!("sidechain_tx_rejected_total");
            tracing::warn!("Transaction rejected: {}", e);
        }
        SubmissionOutcome::Rejected(e @ SubmissionError::PropagationFailure(_)) => {
            metrics::increment_counter!("sidechain_tx_rejected_total");
            tracing::error!("Transaction lost: {}", e);
        }
    }
}
