use crate::crypto::verify_digest;
use crate::error::{Error, KeyAccessError, PreValidationError};
use crate::registry::MembershipDirectory;
use crate::types::{
    ChaincodeDeploymentSpec, ChaincodeInvocationSpec, ChaincodeSpec, MAX_UUID_LEN, Transaction,
    TransactionType,
};
use ethers::types::Signature;
use tracing::{debug, warn};

/// Check that `uuid` is a well-formed uniqueness token.
///
/// Accepts 1 to [`MAX_UUID_LEN`] characters of `[A-Za-z0-9._:-]`.
pub fn check_uuid(uuid: &str) -> Result<(), PreValidationError> {
    let well_formed = !uuid.is_empty()
        && uuid.len() <= MAX_UUID_LEN
        && uuid
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '-'));

    if well_formed {
        Ok(())
    } else {
        Err(PreValidationError::MalformedUuid(uuid.to_string()))
    }
}

/// A chaincode name must contain something other than whitespace.
pub fn check_chaincode_name(name: &str) -> Result<(), PreValidationError> {
    if name.trim().is_empty() {
        return Err(PreValidationError::MissingField("chaincode_id"));
    }
    Ok(())
}

/// Structural rules for a deployment descriptor, shared by the client
/// (before signing) and by pre-validation (after decoding the payload).
pub fn check_deployment_spec(spec: &ChaincodeDeploymentSpec) -> Result<(), PreValidationError> {
    check_chaincode_name(&spec.chaincode_spec.chaincode_id.name)?;
    if spec.code_package.is_empty() {
        return Err(PreValidationError::MalformedPayload(
            "deployment carries no code package".to_string(),
        ));
    }
    Ok(())
}

pub fn check_invocation_spec(spec: &ChaincodeInvocationSpec) -> Result<(), PreValidationError> {
    check_chaincode_name(&spec.chaincode_spec.chaincode_id.name)
}

/// Required fields of a signed transaction.
pub(crate) struct SignedParts<'a> {
    pub signer: &'a str,
    pub signature: &'a Signature,
}

/// Structural well-formedness against the declared variant.
pub(crate) fn check_structure(tx: &Transaction) -> Result<SignedParts<'_>, PreValidationError> {
    let signer = tx
        .signer
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(PreValidationError::MissingField("signer"))?;
    let signature = tx
        .signature
        .as_ref()
        .ok_or(PreValidationError::MissingField("signature"))?;
    if tx.uuid.is_empty() {
        return Err(PreValidationError::MissingField("uuid"));
    }
    check_chaincode_name(&tx.chaincode_id.name)?;
    if tx.payload.is_empty() {
        return Err(PreValidationError::MissingField("payload"));
    }

    let chaincode_spec = match tx.tx_type {
        TransactionType::ChaincodeDeploy => {
            let spec: ChaincodeDeploymentSpec = decode_payload(&tx.payload)?;
            check_deployment_spec(&spec)?;
            spec.chaincode_spec
        }
        TransactionType::ChaincodeInvoke => {
            let spec: ChaincodeInvocationSpec = decode_payload(&tx.payload)?;
            check_invocation_spec(&spec)?;
            spec.chaincode_spec
        }
    };
    check_binding(tx, &chaincode_spec)?;

    Ok(SignedParts { signer, signature })
}

fn decode_payload<T: serde::de::DeserializeOwned>(payload: &[u8]) -> Result<T, PreValidationError> {
    serde_json::from_slice(payload).map_err(|e| PreValidationError::MalformedPayload(e.to_string()))
}

fn check_binding(tx: &Transaction, spec: &ChaincodeSpec) -> Result<(), PreValidationError> {
    if spec.chaincode_id != tx.chaincode_id {
        return Err(PreValidationError::MalformedPayload(format!(
            "payload targets chaincode {} but transaction names {}",
            spec.chaincode_id.name, tx.chaincode_id.name
        )));
    }
    Ok(())
}

/// Verify the transaction signature against the key registered for its
/// declared signer.
pub(crate) async fn check_signature(
    directory: &MembershipDirectory,
    tx: &Transaction,
    parts: &SignedParts<'_>,
) -> Result<(), Error> {
    let key = match directory.verification_key(parts.signer).await {
        Ok(key) => key,
        Err(KeyAccessError::UnknownMember(name)) => {
            warn!("Transaction {} signed by unenrolled {}", tx.uuid, name);
            return Err(PreValidationError::UnknownSigner(name).into());
        }
        Err(e) => return Err(e.into()),
    };

    verify_digest(key, parts.signature, tx.signing_digest()).map_err(|reason| {
        warn!("Signature check failed for transaction {}: {}", tx.uuid, reason);
        PreValidationError::InvalidSignature {
            signer: parts.signer.to_string(),
            reason,
        }
    })?;

    debug!("Transaction {} signature valid for {}", tx.uuid, parts.signer);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_uuid() {
        assert!(check_uuid("tx-001").is_ok());
        assert!(check_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(check_uuid("batch:7.tx_3").is_ok());

        assert!(check_uuid("").is_err());
        assert!(check_uuid("tx 001").is_err());
        assert!(check_uuid("tx/001").is_err());
        assert!(check_uuid("tx-ü").is_err());
        assert!(check_uuid(&"a".repeat(MAX_UUID_LEN)).is_ok());
        assert!(check_uuid(&"a".repeat(MAX_UUID_LEN + 1)).is_err());
    }

    #[test]
    fn test_check_chaincode_name_rejects_blank() {
        assert!(check_chaincode_name("asset_mgmt").is_ok());
        for name in ["", " ", "\t\n"] {
            assert!(matches!(
                check_chaincode_name(name),
                Err(PreValidationError::MissingField("chaincode_id"))
            ));
        }
    }

    #[test]
    fn test_check_deployment_spec_requires_code() {
        let mut spec = ChaincodeDeploymentSpec::default();
        spec.chaincode_spec.chaincode_id.name = "asset_mgmt".to_string();
        assert!(matches!(
            check_deployment_spec(&spec),
            Err(PreValidationError::MalformedPayload(_))
        ));

        spec.code_package = b"package main".to_vec();
        assert!(check_deployment_spec(&spec).is_ok());
    }
}
