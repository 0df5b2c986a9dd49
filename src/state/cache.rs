use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Validator's local view of which chaincodes are deployed.
///
/// Pre-execution only reads it. Entries are added by the execution pipeline
/// once a deployment commits, or seeded from configuration at startup.
#[derive(Clone, Default)]
pub struct ChaincodeRegistry {
    deployed: Arc<RwLock<HashSet<String>>>,
}

impl ChaincodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_deployed(&self, name: &str) -> bool {
        let deployed = self.deployed.read().await;
        deployed.contains(name)
    }

    /// Returns `false` if the chaincode was already known.
    pub async fn mark_deployed(&self, name: impl Into<String>) -> bool {
        let mut deployed = self.deployed.write().await;
        deployed.insert(name.into())
    }

    pub async fn remove(&self, name: &str) -> bool {
        let mut deployed = self.deployed.write().await;
        deployed.remove(name)
    }

    pub async fn len(&self) -> usize {
        self.deployed.read().await.len()
    }
}
