//! In-memory storage backend.

pub mod shared_store;
pub mod transaction_repository;

pub use shared_store::SharedTransactionStore;
pub use transaction_repository::InMemoryTransactionStore;
