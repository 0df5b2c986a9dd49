use super::peer::NodePeer;
use crate::config::AdmissionConfig;
use crate::crypto::{KeyStore, verify_message};
use crate::error::{Error, KeyAccessError, PreExecutionError, VerificationError};
use crate::registry::MembershipDirectory;
use crate::roles::{Entity, Peer, Validator, VerificationKeyRef};
use crate::state::ChaincodeRegistry;
use crate::types::{AdmissionStage, Identity, Transaction, TransactionType};
use ethers::types::{Address, Signature};
use tracing::{debug, warn};

/// Validator: a peer that also runs pre-execution checks and owns a
/// signing key.
pub struct NodeValidator {
    peer: NodePeer,
    keys: KeyStore,
    chaincodes: ChaincodeRegistry,
    config: AdmissionConfig,
}

impl NodeValidator {
    pub fn new(
        identity: Identity,
        keys: KeyStore,
        directory: MembershipDirectory,
        chaincodes: ChaincodeRegistry,
        config: AdmissionConfig,
    ) -> Self {
        Self {
            peer: NodePeer::new(identity, directory),
            keys,
            chaincodes,
            config,
        }
    }

    /// This validator's own verification key.
    pub fn verification_key(&self) -> Address {
        self.keys.address()
    }

    pub fn chaincodes(&self) -> &ChaincodeRegistry {
        &self.chaincodes
    }

    /// De-enroll: the signing key is dropped and `sign` fails from now on.
    pub fn retire(&self) -> Result<(), KeyAccessError> {
        self.keys.retire()
    }

    async fn resolve(&self, vk: &VerificationKeyRef) -> Result<Address, KeyAccessError> {
        match vk {
            VerificationKeyRef::Local => Ok(self.keys.address()),
            VerificationKeyRef::Named(name) => self.peer.directory().verification_key(name).await,
        }
    }

    fn check_timestamp(&self, tx: &Transaction) -> Result<(), PreExecutionError> {
        let now = chrono::Utc::now().timestamp() as u64;
        if tx.timestamp > now.saturating_add(self.config.max_clock_skew_secs) {
            return Err(PreExecutionError::TimestampInFuture {
                timestamp: tx.timestamp,
                now,
            });
        }
        Ok(())
    }

    async fn check_chaincode(&self, tx: &Transaction) -> Result<(), PreExecutionError> {
        let name = &tx.chaincode_id.name;
        let deployed = self.chaincodes.is_deployed(name).await;

        match tx.tx_type {
            TransactionType::ChaincodeDeploy if deployed => {
                Err(PreExecutionError::ChaincodeAlreadyDeployed(name.clone()))
            }
            TransactionType::ChaincodeInvoke if !deployed => {
                Err(PreExecutionError::ChaincodeNotFound(name.clone()))
            }
            _ => Ok(()),
        }
    }
}

impl Entity for NodeValidator {
    fn name(&self) -> &str {
        self.peer.name()
    }
}

impl Peer for NodeValidator {
    fn id(&self) -> &[u8] {
        self.peer.id()
    }

    fn enrollment_id(&self) -> &str {
        self.peer.enrollment_id()
    }

    async fn transaction_pre_validation(&self, tx: &Transaction) -> Result<Transaction, Error> {
        self.peer.transaction_pre_validation(tx).await
    }
}

impl Validator for NodeValidator {
    async fn transaction_pre_execution(&self, tx: &Transaction) -> Result<Transaction, Error> {
        debug!("{} pre-executing transaction {}", self.name(), tx.uuid);

        // stage() is bound to the signed content, so an edited copy of a
        // pre-validated transaction reads as Constructed here
        if tx.stage() != AdmissionStage::PreValidated {
            warn!(
                "Transaction {} reached pre-execution in stage {:?}",
                tx.uuid,
                tx.stage()
            );
            return Err(PreExecutionError::NotPreValidated(tx.uuid.clone()).into());
        }

        let checked = match self.check_timestamp(tx) {
            Ok(()) => self.check_chaincode(tx).await,
            Err(e) => Err(e),
        };
        if let Err(e) = checked {
            warn!("Transaction {} not executable: {}", tx.uuid, e);
            return Err(e.into());
        }

        debug!("Transaction {} pre-executed", tx.uuid);
        Ok(tx.advanced_to(AdmissionStage::PreExecuted))
    }

    fn sign(&self, msg: &[u8]) -> Result<Signature, KeyAccessError> {
        self.keys.sign_message(msg)
    }

    async fn verify(
        &self,
        vk: &VerificationKeyRef,
        signature: &Signature,
        message: &[u8],
    ) -> Result<(), VerificationError> {
        let key = self.resolve(vk).await?;
        verify_message(key, signature, message).map_err(VerificationError::InvalidSignature)
    }
}
