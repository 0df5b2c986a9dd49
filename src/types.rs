use ethers::types::{Signature, H256};
use ethers::utils::keccak256;
use serde::{Deserialize, Serialize};

/// Longest uuid token accepted by admission.
pub const MAX_UUID_LEN: usize = 128;

/// Identity of a network participant, fixed at enrollment time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    id: Vec<u8>,
    enrollment_id: String,
}

impl Identity {
    /// Identity of a peer-capable entity.
    pub fn new(name: impl Into<String>, id: Vec<u8>, enrollment_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id,
            enrollment_id: enrollment_id.into(),
        }
    }

    /// Identity of a pure client, which has no peer identifier.
    pub fn client(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            enrollment_id: name.clone(),
            name,
            id: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &[u8] {
        &self.id
    }

    pub fn enrollment_id(&self) -> &str {
        &self.enrollment_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChaincodeId {
    pub name: String,
}

impl ChaincodeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeInput {
    pub function: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeSpec {
    pub chaincode_id: ChaincodeId,
    pub ctor_msg: ChaincodeInput,
}

/// Deployment descriptor: the chaincode spec plus its packaged code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeDeploymentSpec {
    pub chaincode_spec: ChaincodeSpec,
    pub code_package: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeInvocationSpec {
    pub chaincode_spec: ChaincodeSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    ChaincodeDeploy,
    ChaincodeInvoke,
}

impl TransactionType {
    fn tag(self) -> u8 {
        match self {
            TransactionType::ChaincodeDeploy => 1,
            TransactionType::ChaincodeInvoke => 2,
        }
    }
}

/// How far a transaction has progressed through local admission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdmissionStage {
    #[default]
    Constructed,
    PreValidated,
    PreExecuted,
}

/// Signed chaincode transaction
///
/// The payload is the JSON encoding of the deployment or invocation spec
/// matching `tx_type`. The admission stage is local bookkeeping and is never
/// serialized, so a transaction received from the wire always starts out
/// as `Constructed`. The stage is recorded together with the signing digest
/// and signature it was granted for; editing any signed field afterwards
/// drops the transaction back to `Constructed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub tx_type: TransactionType,
    pub chaincode_id: ChaincodeId,
    pub payload: Vec<u8>,
    pub uuid: String,
    pub timestamp: u64,
    pub signer: Option<String>,
    pub signature: Option<Signature>,
    #[serde(skip)]
    annotation: Option<StageAnnotation>,
}

/// Stage granted to one exact signed content.
#[derive(Debug, Clone)]
struct StageAnnotation {
    stage: AdmissionStage,
    digest: H256,
    signature: Option<Signature>,
}

impl Transaction {
    /// Unsigned transaction; only the client constructors hand these out
    /// after attaching a signature.
    pub(crate) fn unsigned(
        tx_type: TransactionType,
        chaincode_id: ChaincodeId,
        payload: Vec<u8>,
        uuid: &str,
        signer: &str,
    ) -> Self {
        Self {
            tx_type,
            chaincode_id,
            payload,
            uuid: uuid.to_string(),
            timestamp: chrono::Utc::now().timestamp() as u64,
            signer: Some(signer.to_string()),
            signature: None,
            annotation: None,
        }
    }

    /// Digest covered by the transaction signature
    ///
    /// Variable length fields are length-prefixed so that no two distinct
    /// transactions share an encoding.
    pub fn signing_digest(&self) -> H256 {
        let mut data = Vec::new();
        data.push(self.tx_type.tag());
        put_bytes(&mut data, self.chaincode_id.name.as_bytes());
        put_bytes(&mut data, &self.payload);
        put_bytes(&mut data, self.uuid.as_bytes());
        data.extend_from_slice(&self.timestamp.to_be_bytes());
        put_bytes(&mut data, self.signer.as_deref().unwrap_or_default().as_bytes());

        H256::from_slice(&keccak256(data))
    }

    /// Stage reached by this exact content, `Constructed` if anything
    /// covered by the signature changed since the stage was granted.
    pub fn stage(&self) -> AdmissionStage {
        match &self.annotation {
            Some(a) if a.signature == self.signature && a.digest == self.signing_digest() => a.stage,
            _ => AdmissionStage::Constructed,
        }
    }

    pub(crate) fn advanced_to(&self, stage: AdmissionStage) -> Self {
        let mut tx = self.clone();
        tx.annotation = Some(StageAnnotation {
            stage,
            digest: self.signing_digest(),
            signature: self.signature.clone(),
        });
        tx
    }
}

fn put_bytes(data: &mut Vec<u8>, bytes: &[u8]) {
    data.extend_from_slice(&(bytes.len() as u64).to_be_bytes());
    data.extend_from_slice(bytes);
}

/// Admission stage at which a transaction was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionStage {
    PreValidation,
    PreExecution,
}

/// Receipt issued for every transaction that enters the admission pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionReceipt {
    pub uuid: String,
    pub status: AdmissionStatus,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionStatus {
    Accepted,
    Rejected {
        stage: RejectionStage,
        reason: String,
        retryable: bool,
    },
}
