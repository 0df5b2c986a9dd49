//! Cryptography Module
//!
//! Signing key storage and the secp256k1 signature scheme used for
//! transactions and raw validator signatures.
//! Messages are prehashed with Keccak-256; verification keys are the
//! addresses derived from the signer's public key.

mod keystore;
pub use keystore::{KeyStore, message_digest, verify_digest, verify_message};
