//! Role Capabilities Module
//!
//! Capability traits for network participants. A concrete type implements
//! exactly the subset it needs: every participant is an [`Entity`], a
//! [`Client`] authors transactions, a [`Peer`] pre-validates them and a
//! [`Validator`] additionally pre-executes and signs.
//!
//! Per transaction the admission flow is
//! `Constructed -> PreValidated -> PreExecuted -> execution pipeline`,
//! and any error along the way is terminal for that transaction.

#![allow(async_fn_in_trait)]

use crate::error::{Error, KeyAccessError, VerificationError};
use crate::types::{ChaincodeDeploymentSpec, ChaincodeInvocationSpec, Transaction};
use ethers::types::Signature;

/// A named network participant.
pub trait Entity {
    fn name(&self) -> &str;
}

/// An entity able to deploy and invoke chaincode.
///
/// Both constructors return fully signed transactions. `uuid` must be
/// unique per caller; reuse is not detected here.
pub trait Client: Entity {
    fn new_chaincode_deploy_transaction(
        &self,
        spec: &ChaincodeDeploymentSpec,
        uuid: &str,
    ) -> Result<Transaction, Error>;

    fn new_chaincode_invoke_transaction(
        &self,
        spec: &ChaincodeInvocationSpec,
        uuid: &str,
    ) -> Result<Transaction, Error>;
}

/// An entity able to receive transactions and check them against the
/// security layer prescriptions.
pub trait Peer: Entity {
    fn id(&self) -> &[u8];

    fn enrollment_id(&self) -> &str;

    /// Structural and signature checks. Returns an annotated copy.
    async fn transaction_pre_validation(&self, tx: &Transaction) -> Result<Transaction, Error>;
}

/// Whose verification key a signature is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationKeyRef {
    /// The verifying validator's own key.
    Local,
    /// The key registered for the named entity.
    Named(String),
}

/// A peer that also pre-executes transactions and exposes raw signing.
pub trait Validator: Peer {
    /// Semantic admission checks on a pre-validated transaction.
    async fn transaction_pre_execution(&self, tx: &Transaction) -> Result<Transaction, Error>;

    /// Sign `msg` with this validator's signing key.
    fn sign(&self, msg: &[u8]) -> Result<Signature, KeyAccessError>;

    /// `Ok(())` exactly when `signature` is a valid signature of `message`
    /// under the key `vk` resolves to.
    async fn verify(
        &self,
        vk: &VerificationKeyRef,
        signature: &Signature,
        message: &[u8],
    ) -> Result<(), VerificationError>;
}
