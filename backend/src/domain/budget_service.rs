//! Budget tracking.
//!
//! Derives progress bars and totals from budget ceilings, and can recompute
//! each category's spend from the month's expense transactions.

use shared::{BudgetCategory, BudgetOverview, BudgetProgress, BudgetStatus, Direction};
use tracing::{debug, info};

use crate::domain::aggregation::{category_totals, percent_of, saturating_sum};
use crate::storage::TransactionStore;

/// Percentage above which a budget is flagged as close to its ceiling
pub const WARNING_THRESHOLD: u32 = 80;

/// Budget service handling progress and reconciliation
#[derive(Debug, Clone, Default)]
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    /// Whole-percent share of the ceiling spent, 0 when there is no ceiling
    pub fn percentage(&self, spent: i64, budget: i64) -> u32 {
        percent_of(spent, budget)
    }

    pub fn status(&self, percentage: u32) -> BudgetStatus {
        if percentage >= 100 {
            BudgetStatus::Exceeded
        } else if percentage > WARNING_THRESHOLD {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OnTrack
        }
    }

    pub fn progress(&self, category: &BudgetCategory) -> BudgetProgress {
        let percentage = self.percentage(category.spent_amount, category.budget_amount);
        BudgetProgress {
            id: category.id.clone(),
            name: category.name.clone(),
            budget_amount: category.budget_amount,
            spent_amount: category.spent_amount,
            remaining: category.budget_amount.saturating_sub(category.spent_amount),
            percentage,
            status: self.status(percentage),
        }
    }

    pub fn overview(&self, categories: &[BudgetCategory]) -> BudgetOverview {
        let total_budget = saturating_sum(categories.iter().map(|c| c.budget_amount));
        let total_spent = saturating_sum(categories.iter().map(|c| c.spent_amount));

        BudgetOverview {
            total_budget,
            total_spent,
            total_remaining: total_budget.saturating_sub(total_spent),
            percentage: self.percentage(total_spent, total_budget),
            categories: categories.iter().map(|c| self.progress(c)).collect(),
        }
    }

    /// Replace each category's `spent_amount` with the magnitude of its expense
    /// transactions in the month. Categories without transactions drop to zero.
    pub fn reconcile_spent<S>(
        &self,
        categories: &[BudgetCategory],
        store: &S,
        year: i32,
        month: u32,
    ) -> Vec<BudgetCategory>
    where
        S: TransactionStore + ?Sized,
    {
        let totals = category_totals(store, year, month, Direction::Expense);

        let reconciled: Vec<BudgetCategory> = categories
            .iter()
            .map(|category| {
                let spent = totals
                    .iter()
                    .find(|t| t.category == category.id)
                    .map_or(0, |t| t.amount.saturating_abs());
                if spent != category.spent_amount {
                    debug!(
                        "Budget {} spend corrected from {} to {}",
                        category.id, category.spent_amount, spent
                    );
                }
                BudgetCategory {
                    spent_amount: spent,
                    ..category.clone()
                }
            })
            .collect();

        info!(
            "Reconciled {} budgets for {}/{}",
            reconciled.len(),
            month + 1,
            year
        );
        reconciled
    }
}
