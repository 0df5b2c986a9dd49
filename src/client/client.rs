use crate::crypto::KeyStore;
use crate::error::{ConstructionError, Error, PreValidationError};
use crate::roles::{Client, Entity};
use crate::types::{
    ChaincodeDeploymentSpec, ChaincodeInvocationSpec, ChaincodeSpec, Identity, Transaction,
    TransactionType,
};
use crate::validation::{check_deployment_spec, check_invocation_spec, check_uuid};
use ethers::types::Address;
use serde::Serialize;
use tracing::debug;

/// Transaction-authoring entity backed by its own signing key.
pub struct NodeClient {
    identity: Identity,
    keys: KeyStore,
}

impl NodeClient {
    pub fn new(identity: Identity, keys: KeyStore) -> Self {
        Self { identity, keys }
    }

    /// Public key other entities verify this client's signatures with.
    pub fn verification_key(&self) -> Address {
        self.keys.address()
    }

    /// De-enroll: no further transactions can be signed.
    pub fn retire(&self) -> Result<(), Error> {
        self.keys.retire().map_err(Error::from)
    }

    /// Serialize `spec` as the payload and sign. `chaincode_spec` must
    /// already have passed the structural check for its variant.
    fn build<S: Serialize>(
        &self,
        tx_type: TransactionType,
        chaincode_spec: &ChaincodeSpec,
        spec: &S,
        uuid: &str,
    ) -> Result<Transaction, ConstructionError> {
        if check_uuid(uuid).is_err() {
            return Err(ConstructionError::InvalidUuid(uuid.to_string()));
        }

        let payload = serde_json::to_vec(spec)?;
        let chaincode_id = chaincode_spec.chaincode_id.clone();
        let mut tx = Transaction::unsigned(tx_type, chaincode_id, payload, uuid, self.name());
        tx.signature = Some(self.keys.sign_digest(tx.signing_digest())?);

        debug!("{} signed {:?} transaction {}", self.name(), tx_type, uuid);
        Ok(tx)
    }
}

/// Same rules peers apply on receipt, so a signed transaction is never
/// structurally rejected later.
fn bind_spec(checked: Result<(), PreValidationError>) -> Result<(), ConstructionError> {
    match checked {
        Ok(()) => Ok(()),
        Err(PreValidationError::MissingField("chaincode_id")) => {
            Err(ConstructionError::MissingChaincodeId)
        }
        Err(e) => Err(ConstructionError::MalformedSpec(e.to_string())),
    }
}

impl Entity for NodeClient {
    fn name(&self) -> &str {
        self.identity.name()
    }
}

impl Client for NodeClient {
    fn new_chaincode_deploy_transaction(
        &self,
        spec: &ChaincodeDeploymentSpec,
        uuid: &str,
    ) -> Result<Transaction, Error> {
        bind_spec(check_deployment_spec(spec))?;
        Ok(self.build(
            TransactionType::ChaincodeDeploy,
            &spec.chaincode_spec,
            spec,
            uuid,
        )?)
    }

    fn new_chaincode_invoke_transaction(
        &self,
        spec: &ChaincodeInvocationSpec,
        uuid: &str,
    ) -> Result<Transaction, Error> {
        bind_spec(check_invocation_spec(spec))?;
        Ok(self.build(
            TransactionType::ChaincodeInvoke,
            &spec.chaincode_spec,
            spec,
            uuid,
        )?)
    }
}
