use admission::{
    AdmissionPipeline,
    config::Config,
    crypto::KeyStore,
    pool::TransactionPool,
    registry::{MemberRecord, MembershipDirectory},
    roles::{Entity, Peer},
    state::ChaincodeRegistry,
    types::Identity,
    validation::NodeValidator,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Entry point for a validating admission node.
///
/// Loads configuration, provisions the signing key and membership directory,
/// then runs the admission pipeline until interrupted. Transactions arrive on
/// the inbound channel from whichever transport is attached to it.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging using tracing_subscriber.
    tracing_subscriber::fmt::init();

    // Configuration path may be given as the first argument.
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/default.toml".to_string());
    let config = Config::load(&path)?;
    // Debug output of the config redacts the signing key.
    info!("Admission node starting with config: {:?}", config);

    // Provision the node's signing key and its identity triple.
    let keys = KeyStore::from_hex(&config.node.signing_key)?;
    let identity = Identity::new(
        config.node.name.clone(),
        config.node.id_bytes()?,
        config.node.enrollment_id.clone(),
    );

    // The node's own record lets other validators resolve its signatures.
    let own_record = MemberRecord {
        name: config.node.name.clone(),
        enrollment_id: config.node.enrollment_id.clone(),
        verification_key: keys.address(),
    };
    let directory = MembershipDirectory::with_members(
        config.directory.lookup_timeout(),
        config.directory.members.iter().cloned().chain(Some(own_record)),
    )
    .await;

    // Seed the chaincodes already deployed on this node.
    // Pre-execution checks invocations and deployments against this set.
    let chaincodes = ChaincodeRegistry::new();
    for name in &config.state.deployed_chaincodes {
        chaincodes.mark_deployed(name.clone()).await;
    }

    let validator = Arc::new(NodeValidator::new(
        identity,
        keys,
        directory,
        chaincodes,
        config.admission.clone(),
    ));
    info!(
        "Validator {} ({}) ready with key {:?}",
        validator.name(),
        validator.enrollment_id(),
        validator.verification_key()
    );

    // Admitted transactions are queued here for the execution pipeline.
    let tx_pool = Arc::new(TransactionPool::new());
    let pipeline = AdmissionPipeline::new(validator, tx_pool);
    // Inbound channel. A transport attaches to the sending half; until one
    // does, the pipeline idles on an open channel.
    let (_inbound_tx, inbound_rx) = mpsc::channel(config.admission.queue_capacity);

    // Run admission until the channel closes or the process is interrupted.
    tokio::select! {
        _ = pipeline.run(inbound_rx) => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    Ok(())
}
