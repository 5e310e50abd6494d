// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::Serialize;
use sidechain_ledger::error::LedgerError;
use thiserror::Error;

/// Why a submitted transaction was not accepted.
///
/// Only ever delivered through a submission outcome, never returned by
/// `submit` itself.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SubmissionError {
    #[error("Transaction failed validation: {0}")]
    ValidationFailure(String),
    #[error("Transaction could not be propagated: {0}")]
    PropagationFailure(String),
}

/// Failure reported by the processing pipeline behind the gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

impl From<PipelineError> for SubmissionError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Rejected(reason) => SubmissionError::ValidationFailure(reason),
            PipelineError::Unavailable(reason) => SubmissionError::PropagationFailure(reason),
        }
    }
}

impl From<LedgerError> for SubmissionError {
    fn from(e: LedgerError) -> Self {
        SubmissionError::ValidationFailure(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Telemetry error: {0}")]
    Telemetry(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, NodeError>;
