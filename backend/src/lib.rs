//! # Pocket Ledger Backend
//!
//! Calendar grid and period aggregation for a personal-finance ledger, plus
//! the transaction, budget and wallet services that sit on top of them.
//!
//! The backend is synchronous and UI agnostic. Presentation layers hold a
//! [`Backend`], read grids and summaries from it, and send commands through
//! its transaction service.

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use shared::{Direction, MonthOverview, ViewMonth};
use tracing::info;

pub mod config;
pub mod domain;
pub mod logging;
pub mod storage;

pub use config::AppConfig;
pub use storage::{
    InMemoryTransactionStore, SharedTransactionStore, StoreError, TransactionStore,
};

use domain::aggregation::{aggregate_month, category_totals};
use domain::date_key::DateKey;

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub config: AppConfig,
    pub store: SharedTransactionStore,
    pub transaction_service: domain::TransactionService<SharedTransactionStore>,
    pub calendar_service: domain::CalendarService,
    pub budget_service: domain::BudgetService,
    pub wallet_service: domain::WalletService,
    pub formatter: domain::CurrencyFormatter,
    pub navigator: domain::MonthNavigator,
}

impl Backend {
    /// Create a backend over an empty in-memory store
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::with_store(config, SharedTransactionStore::default())
    }

    /// Create a backend over an existing store, focused on the current month
    pub fn with_store(config: AppConfig, store: SharedTransactionStore) -> Result<Self> {
        Self::with_store_at(config, store, Local::now().date_naive())
    }

    /// Create a backend as of `today`: the navigator starts on today's month,
    /// and when the config asks for mock data and the store is empty, the
    /// sample day is filed under `today`.
    pub fn with_store_at(
        config: AppConfig,
        store: SharedTransactionStore,
        today: NaiveDate,
    ) -> Result<Self> {
        if config.seed_mock_data && store.keys().is_empty() {
            let seed_key = DateKey::from_naive_date(today)
                .context("Today is outside the supported calendar range")?;
            let mut seed_handle = store.clone();
            domain::mock_data::seed_store(&mut seed_handle, &seed_key)
                .context("Failed to seed sample transactions")?;
        }

        let backend = Backend {
            transaction_service: domain::TransactionService::new(store.clone()),
            calendar_service: domain::CalendarService::new(),
            budget_service: domain::BudgetService::new(),
            wallet_service: domain::WalletService::new(),
            formatter: domain::CurrencyFormatter::with_config(config.display.clone()),
            navigator: domain::MonthNavigator::starting_at(ViewMonth {
                year: today.year(),
                month: today.month0(),
            }),
            store,
            config,
        };
        info!("Backend ready with {} dated keys", backend.store.keys().len());
        Ok(backend)
    }

    /// Grid, totals and expense breakdown of a month
    pub fn month_overview(&self, view: ViewMonth) -> Result<MonthOverview> {
        let grid = self
            .calendar_service
            .build_grid_for(&self.store, view)
            .with_context(|| {
                format!("Failed to build calendar for {}/{}", view.month + 1, view.year)
            })?;

        Ok(MonthOverview {
            view,
            grid,
            summary: aggregate_month(&self.store, view.year, view.month),
            expense_by_category: category_totals(
                &self.store,
                view.year,
                view.month,
                Direction::Expense,
            ),
        })
    }

    /// Overview of the month the navigator currently points at
    pub fn current_overview(&self) -> Result<MonthOverview> {
        self.month_overview(self.navigator.current())
    }
}
