// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use sidechain_ledger::boxes::{LedgerBox, WithdrawalRequestBox, ZenBox};
use sidechain_ledger::proposition::{MCPublicKeyHashProposition, PublicKey25519Proposition};
use sidechain_ledger::registry;
use sidechain_ledger::transaction::{Input, RegularTransaction};
use sidechain_ledger::SerializerRegistry;
use sidechain_node::config::GatewayConfig;
use sidechain_node::errors::{NodeError, Result};
use sidechain_node::gateway::TransactionSubmitter;
use sidechain_node::ledger::{BoxLedger, LedgerPipeline};
use sidechain_node::telemetry;
use std::sync::Arc;
use tokio::sync::oneshot;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let cfg = GatewayConfig::from_env()?;
    tracing::info!("Initializing sidechain node with config: {:?}", cfg);

    let registry = registry::install(SerializerRegistry::standard()?)?;

    let genesis: Box<dyn LedgerBox> = Box::new(ZenBox::new(
        Box::new(PublicKey25519Proposition::new([1; 32])),
        1_000_000,
        0,
    ));
    let genesis_id = registry.box_id(genesis.as_ref())?;
    let ledger = BoxLedger::with_genesis(Arc::clone(&registry), vec![genesis])?;
    tracing::info!("Genesis box {} opened", genesis_id);

    let (pipeline, worker) = LedgerPipeline::spawn(ledger, cfg.queue_capacity);
    let submitter = TransactionSubmitter::new(Arc::clone(&registry), Arc::new(pipeline), cfg)?;

    // Spend genesis: a transfer plus a withdrawal back to the mainchain.
    let mut tx = RegularTransaction::new(
        vec![Input::new(genesis_id, Vec::new())],
        vec![
            Box::new(ZenBox::new(
                Box::new(PublicKey25519Proposition::new([2; 32])),
                600_000,
                1,
            )),
            Box::new(WithdrawalRequestBox::new(
                MCPublicKeyHashProposition::new([3; 20]),
                399_000,
                2,
            )),
        ],
        1_000,
    );
    // Stand-in proof: the wallet would sign this id.
    let id = registry.transaction_id(&tx)?;
    tx.set_proof(0, id.as_bytes().to_vec())?;

    let outcome = submitter.submit(Box::new(tx.clone())).await;
    tracing::info!("Receipt: {}", to_json(&outcome)?);

    // Replaying the same transaction must be refused.
    let (sender, receiver) = oneshot::channel();
    submitter.submit_with_callback(Box::new(tx), move |outcome| {
        let _ = sender.send(outcome);
    });
    let replay = receiver
        .await
        .map_err(|e| NodeError::Runtime(e.to_string()))?;
    tracing::info!("Replay receipt: {}", to_json(&replay)?);

    drop(submitter);
    let ledger = worker.await.map_err(|e| NodeError::Runtime(e.to_string()))?;
    tracing::info!(
        "Ledger holds {} open boxes worth {:?}",
        ledger.open_count(),
        ledger.total_value()
    );
    tracing::debug!("{}", telemetry::get_metrics());
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| NodeError::Runtime(e.to_string()))
}
