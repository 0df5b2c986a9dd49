//! Transaction Validation Module
//!
//! This module admits inbound transactions in two stages:
//! - Pre-validation (any peer): structure, signer signature, uuid format
//! - Pre-execution (validators): stage gating, clock skew, chaincode existence
//!
//! Validators also expose the raw sign/verify primitives.

mod checks;
mod peer;
mod validator;


pub use checks::{check_chaincode_name, check_deployment_spec, check_invocation_spec, check_uuid};
pub use peer::NodePeer;
pub use validator::NodeValidator;
