// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::errors::{NodeError, Result};

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the log subscriber and the Prometheus recorder. Call once per
/// process; a second call fails.
pub fn init_telemetry() -> Result<()> {
    // 1. Initialize Tracing (Logs)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "sidechain_node=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| NodeError::Telemetry(e.to_string()))?;

    // 2. Initialize Metrics (Prometheus)
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| NodeError::Telemetry(e.to_string()))?;

    if PROM_HANDLE.set(handle).is_err() {
        tracing::warn!("Prometheus handle already set. Telemetry re-initialized?");
    }

    metrics::describe_counter!("sidechain_tx_submitted_total", "Transactions handed to the gateway");
    metrics::describe_counter!("sidechain_tx_accepted_total", "Transactions accepted by the pipeline");
    metrics::describe_counter!("sidechain_tx_rejected_total", "Transactions rejected for any cause");
    metrics::describe_histogram!(
        "sidechain_tx_processing_seconds",
        "Time from submission to outcome"
    );

    metrics::gauge!("sidechain_node_up", 1.0);
    Ok(())
}

/// Prometheus text exposition of the gateway metrics.
pub fn get_metrics() -> String {
    PROM_HANDLE
        .get()
        .map_or_else(|| "# metrics not initialized".to_string(), |handle| handle.render())
}
