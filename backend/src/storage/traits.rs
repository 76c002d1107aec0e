//! # Storage Traits
//!
//! This module defines the transaction store contract that the domain layer
//! reads and writes through, so that an in-memory store, a local database or a
//! remote service can back the same calendar and aggregation code.

use shared::{Transaction, TransactionPatch};
use tracing::warn;

use crate::domain::date_key::decode;

/// Errors raised by transaction store writes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Transaction {id} is dated {date} but was filed under {key}")]
    DateMismatch { id: String, date: String, key: String },
    #[error("Transaction {id} already exists under {key}")]
    DuplicateId { id: String, key: String },
    #[error("Transaction {id} not found under {key}")]
    NotFound { id: String, key: String },
    #[error("Transaction store lock poisoned")]
    Poisoned,
}

/// Trait defining the interface for transaction storage operations
///
/// Transactions are grouped by date key and kept in insertion order per key.
/// Keys are raw strings: a store may hold keys that do not decode, and readers
/// are expected to skip those rather than fail.
pub trait TransactionStore: Send + Sync {
    /// Transactions filed under a key. An absent key yields an empty list.
    fn get(&self, date_key: &str) -> Vec<Transaction>;

    /// Every key currently holding at least one transaction
    fn keys(&self) -> Vec<String>;

    /// Keys whose decoded year and zero-based month match the period.
    ///
    /// The default scans `keys()`; stores that keep a month index override it.
    fn keys_for_month(&self, year: i32, month: u32) -> Vec<String> {
        self.keys()
            .into_iter()
            .filter(|key| match decode(key) {
                Ok(parts) => parts.year == year && parts.month == month,
                Err(e) => {
                    warn!("Skipping transactions under unreadable key: {}", e);
                    false
                }
            })
            .collect()
    }

    /// Number of transactions filed under a key
    fn count(&self, date_key: &str) -> usize {
        self.get(date_key).len()
    }

    /// File a transaction under a key. `transaction.date` must equal the key.
    fn put(&mut self, date_key: &str, transaction: Transaction) -> Result<(), StoreError>;

    /// Delete a transaction.
    /// Returns true if the transaction was found and deleted, false otherwise
    fn remove(&mut self, date_key: &str, transaction_id: &str) -> Result<bool, StoreError>;

    /// Apply a patch to a stored transaction and return the updated record
    fn update(
        &mut self,
        date_key: &str,
        transaction_id: &str,
        patch: &TransactionPatch,
    ) -> Result<Transaction, StoreError>;
}
