//! State Module
//!
//! This module holds the validator's local chaincode state used for
//! pre-execution checks (which chaincodes currently exist).

mod cache;
pub use cache::ChaincodeRegistry;
