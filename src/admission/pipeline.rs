//! Admission Pipeline Module
//!
//! Connects the two admission stages to the execution hand-off queue.
//!
//! # Flow
//! 1. Pre-validate the inbound transaction
//! 2. Only if that succeeded, pre-execute the annotated copy
//! 3. Push the pre-executed copy into the `TransactionPool`
//! 4. Issue an `AdmissionReceipt` (accepted or rejected with the stage)
//!
//! A rejected transaction is dropped. Nothing is retried here; the receipt
//! tells the caller whether a retry could make sense.

use crate::{
    error::Error,
    pool::TransactionPool,
    roles::Validator,
    AdmissionReceipt, AdmissionStatus, RejectionStage, Transaction,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

pub struct AdmissionPipeline<V> {
    validator: Arc<V>,
    tx_pool: Arc<TransactionPool>,
}

impl<V: Validator> AdmissionPipeline<V> {
    pub fn new(validator: Arc<V>, tx_pool: Arc<TransactionPool>) -> Self {
        Self { validator, tx_pool }
    }

    /// Run one transaction through both admission stages.
    pub async fn admit(&self, tx: Transaction) -> AdmissionReceipt {
        info!("Admitting transaction {}", tx.uuid);

        let validated = match self.validator.transaction_pre_validation(&tx).await {
            Ok(validated) => validated,
            Err(e) => return self.reject(&tx, RejectionStage::PreValidation, e),
        };

        let executable = match self.validator.transaction_pre_execution(&validated).await {
            Ok(executable) => executable,
            Err(e) => return self.reject(&tx, RejectionStage::PreExecution, e),
        };

        let uuid = executable.uuid.clone();
        let depth = self.tx_pool.add(executable).await;
        info!("Transaction {} admitted, {} queued for execution", uuid, depth);

        AdmissionReceipt {
            uuid,
            status: AdmissionStatus::Accepted,
            timestamp: now(),
        }
    }

    /// Admit transactions from `inbound` until the sender side closes.
    pub async fn run(&self, mut inbound: mpsc::Receiver<Transaction>) {
        info!("Admission pipeline started");
        while let Some(tx) = inbound.recv().await {
            self.admit(tx).await;
        }
        info!("Inbound channel closed, admission pipeline stopping");
    }

    fn reject(&self, tx: &Transaction, stage: RejectionStage, error: Error) -> AdmissionReceipt {
        warn!("Transaction {} rejected at {:?}: {}", tx.uuid, stage, error);
        AdmissionReceipt {
            uuid: tx.uuid.clone(),
            status: AdmissionStatus::Rejected {
                stage,
                retryable: error.is_retryable(),
                reason: error.to_string(),
            },
            timestamp: now(),
        }
    }
}

fn now() -> u64 {
    chrono::Utc::now().timestamp() as u64
}
