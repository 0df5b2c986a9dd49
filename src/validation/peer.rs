use super::checks::{check_signature, check_structure, check_uuid};
use crate::error::Error;
use crate::registry::MembershipDirectory;
use crate::roles::{Entity, Peer};
use crate::types::{AdmissionStage, Identity, Transaction};
use tracing::{debug, warn};

/// Peer performing first-line admission.
///
/// Holds no per-transaction state, so concurrent pre-validations of
/// distinct transactions never interfere.
pub struct NodePeer {
    identity: Identity,
    directory: MembershipDirectory,
}

impl NodePeer {
    pub fn new(identity: Identity, directory: MembershipDirectory) -> Self {
        Self {
            identity,
            directory,
        }
    }

    pub fn directory(&self) -> &MembershipDirectory {
        &self.directory
    }
}

impl Entity for NodePeer {
    fn name(&self) -> &str {
        self.identity.name()
    }
}

impl Peer for NodePeer {
    fn id(&self) -> &[u8] {
        self.identity.id()
    }

    fn enrollment_id(&self) -> &str {
        self.identity.enrollment_id()
    }

    async fn transaction_pre_validation(&self, tx: &Transaction) -> Result<Transaction, Error> {
        debug!("{} pre-validating transaction {}", self.name(), tx.uuid);

        // 1. Structure
        let parts = check_structure(tx).inspect_err(|e| {
            warn!("Transaction {} is malformed: {}", tx.uuid, e);
        })?;

        // 2. Signature against the declared signer's key
        check_signature(&self.directory, tx, &parts).await?;

        // 3. Uniqueness token format; deduplication is left to the pipeline
        check_uuid(&tx.uuid).inspect_err(|e| {
            warn!("Transaction rejected: {}", e);
        })?;

        debug!("Transaction {} pre-validated", tx.uuid);
        Ok(tx.advanced_to(AdmissionStage::PreValidated))
    }
}
