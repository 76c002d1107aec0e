//! Shared handle over the in-memory store.
//!
//! Every screen that needs transactions clones the same handle, so an edit made
//! from the dashboard is visible to the budget and analysis views.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use shared::{Transaction, TransactionPatch};

use super::transaction_repository::InMemoryTransactionStore;
use crate::storage::traits::{StoreError, TransactionStore};

#[derive(Debug, Clone, Default)]
pub struct SharedTransactionStore {
    inner: Arc<RwLock<InMemoryTransactionStore>>,
}

impl SharedTransactionStore {
    pub fn new(store: InMemoryTransactionStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> InMemoryTransactionStore {
        self.read().clone()
    }

    // Readers never mutate, so a poisoned lock still holds consistent data
    fn read(&self) -> RwLockReadGuard<'_, InMemoryTransactionStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_write<T>(
        &self,
        f: impl FnOnce(&mut InMemoryTransactionStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        f(&mut guard)
    }
}

impl From<InMemoryTransactionStore> for SharedTransactionStore {
    fn from(store: InMemoryTransactionStore) -> Self {
        Self::new(store)
    }
}

impl TransactionStore for SharedTransactionStore {
    fn get(&self, date_key: &str) -> Vec<Transaction> {
        self.read().get(date_key)
    }

    fn keys(&self) -> Vec<String> {
        self.read().keys()
    }

    fn keys_for_month(&self, year: i32, month: u32) -> Vec<String> {
        self.read().keys_for_month(year, month)
    }

    fn count(&self, date_key: &str) -> usize {
        self.read().count(date_key)
    }

    fn put(&mut self, date_key: &str, transaction: Transaction) -> Result<(), StoreError> {
        self.with_write(|store| store.put(date_key, transaction))
    }

    fn remove(&mut self, date_key: &str, transaction_id: &str) -> Result<bool, StoreError> {
        self.with_write(|store| store.remove(date_key, transaction_id))
    }

    fn update(
        &mut self,
        date_key: &str,
        transaction_id: &str,
        patch: &TransactionPatch,
    ) -> Result<Transaction, StoreError> {
        self.with_write(|store| store.update(date_key, transaction_id, patch))
    }
}
