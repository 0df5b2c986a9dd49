//! Membership Directory Module
//!
//! In-process adapter for the enrollment/membership directory.
//! Enrollment itself happens out of band; this directory only answers
//! "which verification key belongs to this entity" for admission.

use crate::error::KeyAccessError;
use ethers::types::Address;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Directory entry for one enrolled entity
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    pub enrollment_id: String,
    /// Address derived from the entity's secp256k1 public key
    pub verification_key: Address,
}

/// Shared handle to the membership directory
///
/// Cloning is cheap; all clones see the same entries. Every lookup is
/// bounded by `lookup_timeout` so a contended directory surfaces as an
/// error instead of stalling admission.
#[derive(Clone)]
pub struct MembershipDirectory {
    members: Arc<RwLock<HashMap<String, MemberRecord>>>,
    lookup_timeout: Duration,
}

impl MembershipDirectory {
    pub fn new(lookup_timeout: Duration) -> Self {
        Self {
            members: Arc::new(RwLock::new(HashMap::new())),
            lookup_timeout,
        }
    }

    /// Build a directory pre-populated with `records`.
    pub async fn with_members(
        lookup_timeout: Duration,
        records: impl IntoIterator<Item = MemberRecord>,
    ) -> Self {
        let directory = Self::new(lookup_timeout);
        for record in records {
            directory.register(record).await;
        }
        directory
    }

    /// Register (or replace) the record for `record.name`.
    pub async fn register(&self, record: MemberRecord) {
        info!(
            "Registering member {} ({}) with key {:?}",
            record.name, record.enrollment_id, record.verification_key
        );
        let mut members = self.members.write().await;
        members.insert(record.name.clone(), record);
    }

    /// Remove an entity from the directory.
    pub async fn revoke(&self, name: &str) -> Option<MemberRecord> {
        let mut members = self.members.write().await;
        let removed = members.remove(name);
        if removed.is_some() {
            info!("Revoked member {}", name);
        }
        removed
    }

    /// Resolve `name` to its directory record.
    pub async fn lookup(&self, name: &str) -> Result<MemberRecord, KeyAccessError> {
        let members = match timeout(self.lookup_timeout, self.members.read()).await {
            Ok(guard) => guard,
            Err(_) => {
                warn!("Directory lookup for {} timed out", name);
                return Err(KeyAccessError::DirectoryTimeout(self.lookup_timeout));
            }
        };

        let record = members
            .get(name)
            .cloned()
            .ok_or_else(|| KeyAccessError::UnknownMember(name.to_string()))?;
        debug!("Resolved {} to {:?}", name, record.verification_key);
        Ok(record)
    }

    /// Verification key registered for `name`.
    pub async fn verification_key(&self, name: &str) -> Result<Address, KeyAccessError> {
        self.lookup(name).await.map(|record| record.verification_key)
    }

    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }

    #[cfg(test)]
    pub(crate) async fn hold_write_lock(&self) -> tokio::sync::RwLockWriteGuard<'_, HashMap<String, MemberRecord>> {
        self.members.write().await
    }
}
