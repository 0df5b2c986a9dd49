//! Shared fixtures for in-crate tests.

use crate::client::NodeClient;
use crate::config::AdmissionConfig;
use crate::crypto::KeyStore;
use crate::registry::{MemberRecord, MembershipDirectory};
use crate::state::ChaincodeRegistry;
use crate::types::{
    ChaincodeDeploymentSpec, ChaincodeId, ChaincodeInput, ChaincodeInvocationSpec, ChaincodeSpec,
    Identity,
};
use crate::validation::NodeValidator;
use std::time::Duration;

pub const ASSET_CHAINCODE: &str = "asset_mgmt";

pub fn directory() -> MembershipDirectory {
    MembershipDirectory::new(Duration::from_millis(200))
}

/// Client with a fresh key, registered in `directory` under `name`.
pub async fn enrolled_client(directory: &MembershipDirectory, name: &str) -> NodeClient {
    let client = NodeClient::new(Identity::client(name), KeyStore::generate());
    directory
        .register(MemberRecord {
            name: name.to_string(),
            enrollment_id: name.to_string(),
            verification_key: client.verification_key(),
        })
        .await;
    client
}

/// Validator `vp0` sharing `directory`, with `deployed` chaincodes known.
pub async fn validator(directory: &MembershipDirectory, deployed: &[&str]) -> NodeValidator {
    let chaincodes = ChaincodeRegistry::new();
    for name in deployed {
        chaincodes.mark_deployed(*name).await;
    }
    NodeValidator::new(
        Identity::new("vp0", vec![0x76, 0x70, 0x30], "vp0-enrollment"),
        KeyStore::generate(),
        directory.clone(),
        chaincodes,
        AdmissionConfig::default(),
    )
}

pub fn chaincode_spec(name: &str, function: &str) -> ChaincodeSpec {
    ChaincodeSpec {
        chaincode_id: ChaincodeId::new(name),
        ctor_msg: ChaincodeInput {
            function: function.to_string(),
            args: vec!["a".to_string(), "100".to_string()],
        },
    }
}

pub fn deployment_spec(name: &str) -> ChaincodeDeploymentSpec {
    ChaincodeDeploymentSpec {
        chaincode_spec: chaincode_spec(name, "init"),
        code_package: b"package main".to_vec(),
    }
}

pub fn invocation_spec(name: &str) -> ChaincodeInvocationSpec {
    ChaincodeInvocationSpec {
        chaincode_spec: chaincode_spec(name, "transfer"),
    }
}
