//! # Domain Module
//!
//! Business logic for the ledger: the calendar grid, period aggregation and
//! the services built on top of them.
//!
//! ## Module Organization
//!
//! - **date_key**: `"YYYY-MM-DD"` keys and month arithmetic (months are zero-based)
//! - **aggregation**: day and month income/expense totals, category and daily breakdowns
//! - **calendar**: month grid construction, day detail and labels
//! - **navigation**: month stepping and the shared focus month
//! - **transaction_service**: create, edit, move and delete transactions
//! - **categories**: the static expense and income catalogs
//! - **budget_service**: budget progress and reconciliation
//! - **wallet_service**: asset, debt and lending totals
//! - **formatting**: currency display
//! - **mock_data**: sample content for demos
//!
//! ## Business Rules
//!
//! - Positive amounts are income, zero and negative amounts are expense
//! - A transaction is filed under the key equal to its own `date`
//! - Keys that do not decode are skipped with a warning, never fatal
//! - A grid is leading padding up to the 1st's weekday plus one cell per day

pub mod aggregation;
pub mod budget_service;
pub mod calendar;
pub mod categories;
pub mod commands;
pub mod date_key;
pub mod formatting;
pub mod mock_data;
pub mod navigation;
pub mod transaction_service;
pub mod wallet_service;

pub use budget_service::BudgetService;
pub use calendar::CalendarService;
pub use date_key::{CalendarError, DateKey, KeyParts};
pub use formatting::{CurrencyFormatter, FormatOptions, FormattingConfig};
pub use navigation::MonthNavigator;
pub use transaction_service::{TransactionService, ValidationError};
pub use wallet_service::WalletService;
