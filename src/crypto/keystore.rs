use crate::error::KeyAccessError;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, Signature, H256};
use ethers::utils::keccak256;
use std::sync::RwLock;
use tracing::{debug, info};

/// Holder of one entity's signing key
///
/// The key is provisioned once and only ever used in place: nothing returns
/// or clones it. Retiring the key drops it, after which every signing
/// attempt fails. The verification key (address) stays available so that
/// signatures produced before retirement can still be checked.
pub struct KeyStore {
    wallet: RwLock<Option<LocalWallet>>,
    address: Address,
}

impl KeyStore {
    /// Key store over an already provisioned wallet.
    pub fn new(wallet: LocalWallet) -> Self {
        let address = wallet.address();
        Self {
            wallet: RwLock::new(Some(wallet)),
            address,
        }
    }

    /// Fresh random key, for tests and local development nodes.
    pub fn generate() -> Self {
        Self::new(LocalWallet::new(&mut ethers::core::rand::thread_rng()))
    }

    /// Load a hex encoded secp256k1 private key.
    pub fn from_hex(private_key: &str) -> Result<Self, KeyAccessError> {
        let wallet: LocalWallet = private_key
            .trim()
            .parse()
            .map_err(|e| KeyAccessError::KeyStore(format!("invalid signing key: {}", e)))?;
        Ok(Self::new(wallet))
    }

    /// Verification key matching the stored signing key.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn is_retired(&self) -> bool {
        match self.wallet.read() {
            Ok(wallet) => wallet.is_none(),
            Err(_) => true,
        }
    }

    /// Sign a 32-byte digest.
    pub fn sign_digest(&self, digest: H256) -> Result<Signature, KeyAccessError> {
        let guard = self
            .wallet
            .read()
            .map_err(|_| KeyAccessError::KeyStore("key store lock poisoned".to_string()))?;
        let wallet = guard.as_ref().ok_or(KeyAccessError::SigningKeyRetired)?;

        wallet
            .sign_hash(digest)
            .map_err(|e| KeyAccessError::KeyStore(e.to_string()))
    }

    /// Sign arbitrary bytes (Keccak-256 prehash).
    pub fn sign_message(&self, message: &[u8]) -> Result<Signature, KeyAccessError> {
        self.sign_digest(message_digest(message))
    }

    /// Drop the signing key at de-enrollment.
    pub fn retire(&self) -> Result<(), KeyAccessError> {
        let mut guard = self
            .wallet
            .write()
            .map_err(|_| KeyAccessError::KeyStore("key store lock poisoned".to_string()))?;
        if guard.take().is_some() {
            info!("Signing key for {:?} retired", self.address);
        }
        Ok(())
    }
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStore")
            .field("address", &self.address)
            .field("retired", &self.is_retired())
            .finish()
    }
}

pub fn message_digest(message: &[u8]) -> H256 {
    H256::from(keccak256(message))
}

/// Check `signature` over `digest` against the verification key `address`.
///
/// Returns the reason on failure.
pub fn verify_digest(address: Address, signature: &Signature, digest: H256) -> Result<(), String> {
    signature.verify(digest, address).map_err(|e| {
        debug!("Signature check against {:?} failed: {}", address, e);
        e.to_string()
    })
}

/// Message counterpart of [`KeyStore::sign_message`].
pub fn verify_message(address: Address, signature: &Signature, message: &[u8]) -> Result<(), String> {
    verify_digest(address, signature, message_digest(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEV_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn test_sign_then_verify_message() {
        let store = KeyStore::generate();
        let signature = store.sign_message(b"hello ledger").unwrap();

        assert!(verify_message(store.address(), &signature, b"hello ledger").is_ok());
        assert!(verify_message(store.address(), &signature, b"hello ledger!").is_err());
    }

    #[test]
    fn test_signature_from_other_key_rejected() {
        let alice = KeyStore::generate();
        let mallory = KeyStore::generate();
        let signature = mallory.sign_message(b"transfer").unwrap();

        assert!(verify_message(alice.address(), &signature, b"transfer").is_err());
    }

    #[test]
    fn test_from_hex_is_deterministic() {
        let a = KeyStore::from_hex(DEV_KEY).unwrap();
        let b = KeyStore::from_hex(DEV_KEY).unwrap();
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        let result = KeyStore::from_hex("not-a-key");
        assert!(matches!(result, Err(KeyAccessError::KeyStore(_))));
    }

    #[test]
    fn test_retired_key_cannot_sign() {
        let store = KeyStore::generate();
        let address = store.address();
        let before = store.sign_message(b"m").unwrap();

        store.retire().unwrap();

        assert!(store.is_retired());
        assert!(matches!(
            store.sign_message(b"m"),
            Err(KeyAccessError::SigningKeyRetired)
        ));
        // Old signatures still verify
        assert_eq!(store.address(), address);
        assert!(verify_message(address, &before, b"m").is_ok());
    }
}
