//! Error Module
//!
//! Error taxonomy for transaction construction and admission.
//! Each admission stage has its own error type so callers can tell
//! "malformed or unauthenticated" apart from "authenticated but not
//! currently executable", and both apart from infrastructure faults.

use std::time::Duration;
use thiserror::Error;

/// Raised while a client builds and signs a transaction.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("chaincode spec does not name a chaincode")]
    MissingChaincodeId,

    #[error("malformed chaincode spec: {0}")]
    MalformedSpec(String),

    #[error("invalid uuid token {0:?}")]
    InvalidUuid(String),

    #[error("failed to serialize chaincode spec: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to sign transaction: {0}")]
    Signing(#[from] KeyAccessError),
}

/// Raised by the structural and signature checks of pre-validation.
#[derive(Debug, Error)]
pub enum PreValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("malformed uuid token {0:?}")]
    MalformedUuid(String),

    #[error("signer {0} is not enrolled")]
    UnknownSigner(String),

    #[error("invalid signature from {signer}: {reason}")]
    InvalidSignature { signer: String, reason: String },
}

/// Raised by pre-execution on a transaction that passed pre-validation.
#[derive(Debug, Error)]
pub enum PreExecutionError {
    #[error("transaction {0} has not passed pre-validation")]
    NotPreValidated(String),

    #[error("chaincode {0} is not deployed")]
    ChaincodeNotFound(String),

    #[error("chaincode {0} is already deployed")]
    ChaincodeAlreadyDeployed(String),

    #[error("timestamp {timestamp} is ahead of local clock {now}")]
    TimestampInFuture { timestamp: u64, now: u64 },
}

/// Key material or a verification key could not be obtained.
#[derive(Debug, Error)]
pub enum KeyAccessError {
    #[error("signing key has been retired")]
    SigningKeyRetired,

    #[error("key store unavailable: {0}")]
    KeyStore(String),

    #[error("no verification key registered for {0}")]
    UnknownMember(String),

    #[error("membership directory lookup timed out after {0:?}")]
    DirectoryTimeout(Duration),
}

/// Result of a failed `Validator::verify`.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error(transparent)]
    KeyAccess(#[from] KeyAccessError),

    #[error("signature verification failed: {0}")]
    InvalidSignature(String),
}

/// Umbrella error returned by the role traits.
#[derive(Debug, Error)]
pub enum Error {
    #[error("construction error: {0}")]
    Construction(#[from] ConstructionError),

    #[error("pre-validation error: {0}")]
    PreValidation(#[from] PreValidationError),

    #[error("pre-execution error: {0}")]
    PreExecution(#[from] PreExecutionError),

    #[error("key access error: {0}")]
    KeyAccess(#[from] KeyAccessError),
}

impl Error {
    /// Whether the same transaction could succeed later without changes.
    ///
    /// Pre-validation and construction failures are final. Pre-execution
    /// and key access failures depend on local state or infrastructure.
    /// The core never retries on its own; this only informs the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::PreExecution(_) | Error::KeyAccess(_))
    }
}
