//! Transaction Pool Module
//!
//! Hand-off queue between admission and the execution pipeline.
//! Only transactions that passed both admission stages are added, in the
//! annotated form returned by pre-execution.

use crate::Transaction;
use std::collections::VecDeque;
use tokio::sync::RwLock;

/// Pool of admitted transactions
///
/// Arrival order is execution order: the pipeline pushes at the back and
/// the executor takes from the front.
pub struct TransactionPool {
    /// Admitted transactions, oldest first
    transactions: RwLock<VecDeque<Transaction>>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self {
            transactions: RwLock::new(VecDeque::new()),
        }
    }

    /// Queue a transaction returned by pre-execution
    ///
    /// # Arguments
    /// * `tx` - Transaction annotated `PreExecuted`
    ///
    /// # Returns
    /// Queue depth after the insert
    pub async fn add(&self, tx: Transaction) -> usize {
        let mut queue = self.transactions.write().await;
        queue.push_back(tx);
        queue.len()
    }

    /// Hand the oldest admitted transactions to the executor
    ///
    /// # Arguments
    /// * `max` - Upper bound on the batch size
    ///
    /// # Returns
    /// Up to `max` transactions in admission order; the rest stay queued
    pub async fn get_pending(&self, max: usize) -> Vec<Transaction> {
        let mut queue = self.transactions.write().await;
        let at = max.min(queue.len());
        let remaining = queue.split_off(at);
        Vec::from(std::mem::replace(&mut *queue, remaining))
    }

    pub async fn len(&self) -> usize {
        self.transactions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transactions.read().await.is_empty()
    }
}

impl Default for TransactionPool {
    fn default() -> Self {
        Self::new()
    }
}
