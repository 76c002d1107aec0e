//! In-memory transaction store.
//!
//! Holds transactions in a `BTreeMap` keyed by date key, and maintains a
//! secondary `(year, month) -> keys` index on every write so month queries do
//! not scan the whole store.

use std::collections::{BTreeMap, BTreeSet};

use shared::{Transaction, TransactionPatch};
use tracing::{debug, warn};

use crate::domain::date_key::decode;
use crate::storage::traits::{StoreError, TransactionStore};

#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionStore {
    transactions: BTreeMap<String, Vec<Transaction>>,
    month_index: BTreeMap<(i32, u32), BTreeSet<String>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from transactions, filing each under its own `date`
    pub fn from_transactions<I>(transactions: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = Transaction>,
    {
        let mut store = Self::new();
        for transaction in transactions {
            let key = transaction.date.clone();
            store.put(&key, transaction)?;
        }
        Ok(store)
    }

    /// Total number of stored transactions
    pub fn len(&self) -> usize {
        self.transactions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// All transactions in key order, insertion order within a key
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values().flatten()
    }

    fn index_key(&mut self, date_key: &str) {
        match decode(date_key) {
            Ok(parts) => {
                self.month_index
                    .entry((parts.year, parts.month))
                    .or_default()
                    .insert(date_key.to_string());
            }
            Err(e) => warn!(
                "Stored transaction under unreadable key, left out of month index: {}",
                e
            ),
        }
    }

    fn unindex_key(&mut self, date_key: &str) {
        if let Ok(parts) = decode(date_key) {
            let period = (parts.year, parts.month);
            if let Some(keys) = self.month_index.get_mut(&period) {
                keys.remove(date_key);
                if keys.is_empty() {
                    self.month_index.remove(&period);
                }
            }
        }
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn get(&self, date_key: &str) -> Vec<Transaction> {
        self.transactions.get(date_key).cloned().unwrap_or_default()
    }

    fn keys(&self) -> Vec<String> {
        self.transactions.keys().cloned().collect()
    }

    fn keys_for_month(&self, year: i32, month: u32) -> Vec<String> {
        self.month_index
            .get(&(year, month))
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn count(&self, date_key: &str) -> usize {
        self.transactions.get(date_key).map_or(0, Vec::len)
    }

    fn put(&mut self, date_key: &str, transaction: Transaction) -> Result<(), StoreError> {
        if transaction.date != date_key {
            return Err(StoreError::DateMismatch {
                id: transaction.id,
                date: transaction.date,
                key: date_key.to_string(),
            });
        }

        let day = self.transactions.entry(date_key.to_string()).or_default();
        if day.iter().any(|tx| tx.id == transaction.id) {
            return Err(StoreError::DuplicateId {
                id: transaction.id,
                key: date_key.to_string(),
            });
        }

        debug!("Storing transaction {} under {}", transaction.id, date_key);
        let is_new_key = day.is_empty();
        day.push(transaction);
        if is_new_key {
            self.index_key(date_key);
        }
        Ok(())
    }

    fn remove(&mut self, date_key: &str, transaction_id: &str) -> Result<bool, StoreError> {
        let Some(day) = self.transactions.get_mut(date_key) else {
            return Ok(false);
        };
        let Some(position) = day.iter().position(|tx| tx.id == transaction_id) else {
            return Ok(false);
        };

        day.remove(position);
        if day.is_empty() {
            self.transactions.remove(date_key);
            self.unindex_key(date_key);
        }
        debug!("Removed transaction {} from {}", transaction_id, date_key);
        Ok(true)
    }

    fn update(
        &mut self,
        date_key: &str,
        transaction_id: &str,
        patch: &TransactionPatch,
    ) -> Result<Transaction, StoreError> {
        let transaction = self
            .transactions
            .get_mut(date_key)
            .and_then(|day| day.iter_mut().find(|tx| tx.id == transaction_id))
            .ok_or_else(|| StoreError::NotFound {
                id: transaction_id.to_string(),
                key: date_key.to_string(),
            })?;

        if let Some(title) = &patch.title {
            transaction.title = title.clone();
        }
        if let Some(subtitle) = &patch.subtitle {
            transaction.subtitle = subtitle.clone();
        }
        if let Some(amount) = patch.amount {
            transaction.amount = amount;
        }
        if let Some(category) = &patch.category {
            transaction.category = category.clone();
        }
        if let Some(account) = &patch.account {
            transaction.account = account.clone();
        }

        Ok(transaction.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_transaction(id: &str, date: &str, amount: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            title: format!("Test {}", id),
            subtitle: String::new(),
            amount,
            category: "food".to_string(),
            account: "Cash".to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_get_absent_key_is_empty() {
        let store = InMemoryTransactionStore::new();
        assert!(store.get("2024-03-05").is_empty());
        assert_eq!(store.count("2024-03-05"), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_keeps_insertion_order() {
        let mut store = InMemoryTransactionStore::new();
        store.put("2024-03-05", create_test_transaction("b", "2024-03-05", -5)).unwrap();
        store.put("2024-03-05", create_test_transaction("a", "2024-03-05", 500)).unwrap();
        store.put("2024-03-05", create_test_transaction("c", "2024-03-05", -1)).unwrap();

        let ids: Vec<String> = store.get("2024-03-05").into_iter().map(|tx| tx.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_put_rejects_date_mismatch() {
        let mut store = InMemoryTransactionStore::new();
        let result = store.put("2024-03-06", create_test_transaction("a", "2024-03-05", 1));
        assert!(matches!(result, Err(StoreError::DateMismatch { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_rejects_duplicate_id() {
        let mut store = InMemoryTransactionStore::new();
        store.put("2024-03-05", create_test_transaction("a", "2024-03-05", 1)).unwrap();
        let result = store.put("2024-03-05", create_test_transaction("a", "2024-03-05", 2));
        assert!(matches!(result, Err(StoreError::DuplicateId { .. })));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut store = InMemoryTransactionStore::new();
        store.put("2024-03-05", create_test_transaction("a", "2024-03-05", 1)).unwrap();
        store.put("2024-03-05", create_test_transaction("b", "2024-03-05", 2)).unwrap();

        assert!(store.remove("2024-03-05", "a").unwrap());
        assert!(!store.remove("2024-03-05", "a").unwrap());
        assert!(!store.remove("2024-03-09", "b").unwrap());
        assert_eq!(store.count("2024-03-05"), 1);

        // Removing the last transaction drops the key and its index entry
        assert!(store.remove("2024-03-05", "b").unwrap());
        assert!(store.keys().is_empty());
        assert!(store.keys_for_month(2024, 2).is_empty());
    }

    #[test]
    fn test_update_applies_patch_and_keeps_date() {
        let mut store = InMemoryTransactionStore::new();
        store.put("2024-03-05", create_test_transaction("a", "2024-03-05", -100)).unwrap();

        let patch = TransactionPatch {
            title: Some("Groceries".to_string()),
            amount: Some(-250),
            ..Default::default()
        };
        let updated = store.update("2024-03-05", "a", &patch).unwrap();
        assert_eq!(updated.title, "Groceries");
        assert_eq!(updated.amount, -250);
        assert_eq!(updated.date, "2024-03-05");
        assert_eq!(store.get("2024-03-05")[0], updated);
    }

    #[test]
    fn test_update_unknown_transaction() {
        let mut store = InMemoryTransactionStore::new();
        let result = store.update("2024-03-05", "missing", &TransactionPatch::default());
        assert_eq!(
            result,
            Err(StoreError::NotFound { id: "missing".to_string(), key: "2024-03-05".to_string() })
        );
    }

    #[test]
    fn test_month_index() {
        let store = InMemoryTransactionStore::from_transactions(vec![
            create_test_transaction("1", "2024-03-05", 1),
            create_test_transaction("2", "2024-03-01", 1),
            create_test_transaction("3", "2024-04-01", 1),
            create_test_transaction("4", "2023-03-05", 1),
            create_test_transaction("5", "2024-02-30", 1), // typo day
            create_test_transaction("6", "bad-key", 1),
        ])
        .unwrap();

        assert_eq!(store.keys_for_month(2024, 2), vec!["2024-03-01", "2024-03-05"]);
        assert_eq!(store.keys_for_month(2024, 1), vec!["2024-02-30"]);
        assert!(store.keys_for_month(2024, 5).is_empty());
        // Unreadable keys are stored but not indexed
        assert_eq!(store.get("bad-key").len(), 1);
        assert_eq!(store.keys().len(), 6);
    }

    #[test]
    fn test_month_index_matches_default_scan() {
        let store = InMemoryTransactionStore::from_transactions(vec![
            create_test_transaction("1", "2024-03-05", 1),
            create_test_transaction("2", "2024-03-31", 1),
            create_test_transaction("3", "2024-04-01", 1),
            create_test_transaction("4", "20240305", 1),
        ])
        .unwrap();

        let scanned: Vec<String> = store
            .keys()
            .into_iter()
            .filter(|key| matches!(decode(key), Ok(p) if p.year == 2024 && p.month == 2))
            .collect();
        assert_eq!(store.keys_for_month(2024, 2), scanned);
    }
}
