//! Identity and transaction admission layer for a permissioned ledger network.
//! It defines participant roles (client, peer, validator), signed transaction
//! construction, and the two admission stages a transaction passes before it
//! is handed to the execution pipeline.

pub mod types; // Transaction records, chaincode specs, identities and receipts.
pub mod error; // Error taxonomy for construction and admission.
pub mod config; // Defines and loads node configuration.
pub mod crypto; // Signing key storage and signature verification.
pub mod roles; // Capability traits: Entity, Client, Peer, Validator.
pub mod client; // Transaction authoring.
pub mod registry; // Membership directory of verification keys.
pub mod state; // Validator's local chaincode view.
pub mod validation; // Pre-validation and pre-execution.
pub mod pool; // Hand-off queue to the execution pipeline.
pub mod admission; // Sequences the admission stages.

#[cfg(test)]
mod test_utils;

// Re-export commonly used types for easier access.
pub use types::*;
pub use config::Config;
pub use error::Error;
pub use admission::AdmissionPipeline;
