//! Transaction Pool Module
//!
//! This module holds admitted transactions until the execution pipeline
//! picks them up.

mod tx_pool;

pub use tx_pool::TransactionPool;
