//! # Storage Module
//!
//! Holds transactions for the calendar and aggregation logic.
//!
//! The domain layer only talks to the [`TransactionStore`] trait. This crate
//! ships an in-memory implementation; a local database or a remote API can be
//! plugged in behind the same contract without touching the domain services.
//!
//! ## Key Responsibilities
//!
//! - **Date-keyed grouping**: Transactions are filed under their `YYYY-MM-DD` key
//! - **Key/date consistency**: A transaction is only accepted under its own date
//! - **Month index**: Month queries read an index kept up to date on every write
//! - **Sharing**: A cloneable handle lets several views read one store

pub mod memory;
pub mod traits;

pub use memory::{InMemoryTransactionStore, SharedTransactionStore};
pub use traits::{StoreError, TransactionStore};
