use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single signed money movement filed under one date key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque unique identifier assigned at creation
    pub id: String,
    /// Short display label
    pub title: String,
    /// Secondary free-text annotation, may be empty
    pub subtitle: String,
    /// Amount in the smallest currency unit (positive for income, otherwise expense)
    pub amount: i64,
    /// Category id from the static catalog
    pub category: String,
    /// Label of the owning wallet/account
    pub account: String,
    /// Date key (YYYY-MM-DD) this transaction is filed under
    pub date: String,
}

impl Transaction {
    /// Direction of the transaction. Zero amounts are classified as expense.
    pub fn direction(&self) -> Direction {
        if self.amount > 0 {
            Direction::Income
        } else {
            Direction::Expense
        }
    }
}

/// Partial update of a stored transaction.
///
/// Carries no `date`. Moving a transaction to another day is remove + put, so
/// the store key and `Transaction::date` stay equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub amount: Option<i64>,
    pub category: Option<String>,
    pub account: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subtitle.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.account.is_none()
    }
}

/// Money direction used by category catalogs and list tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Expense,
    Income,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Expense => write!(f, "expense"),
            Direction::Income => write!(f, "income"),
        }
    }
}

/// Income/expense totals of a single day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    /// Sum of positive amounts
    pub income: i64,
    /// Sum of non-positive amounts (zero or negative)
    pub expense: i64,
}

impl DaySummary {
    pub fn net(&self) -> i64 {
        self.income + self.expense
    }
}

/// Income/expense/net totals of a period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub income: i64,
    pub expense: i64,
    pub net: i64,
}

/// One cell of a month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    /// Day of month, `None` for leading padding cells
    pub day: Option<u32>,
    /// Date key of the day, empty for padding cells
    pub date_key: String,
    /// Whether at least one transaction is filed under this day
    pub has_data: bool,
    /// Net total of the day, only present when `has_data` is true
    pub daily_total: Option<i64>,
}

impl DayCell {
    pub fn padding() -> Self {
        Self {
            day: None,
            date_key: String::new(),
            has_data: false,
            daily_total: None,
        }
    }

    pub fn is_padding(&self) -> bool {
        self.day.is_none()
    }
}

/// Represents a calendar month with its cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarGrid {
    pub year: i32,
    /// Zero-based month (0 = January)
    pub month: u32,
    pub first_weekday: u32, // 0 = Sunday, 1 = Monday, etc.
    pub cells: Vec<DayCell>,
}

/// Month currently shown by a calendar or stats header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ViewMonth {
    pub year: i32,
    /// Zero-based month (0 = January)
    pub month: u32,
}

impl Default for ViewMonth {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            year: now.year(),
            month: now.month0(),
        }
    }
}

/// Transactions and totals of the day selected below the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDetail {
    pub date_key: String,
    pub summary: DaySummary,
    pub transactions: Vec<Transaction>,
}

/// Static catalog entry describing a transaction category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Icon token understood by the presentation layer
    pub icon: String,
    pub color: String,
    pub background_color: String,
    pub direction: Direction,
}

/// Per-category total of a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    /// Signed sum (negative for expense categories)
    pub amount: i64,
    pub transaction_count: usize,
    /// Share of the direction total in whole percent
    pub share_percent: u32,
}

/// Income and expense of a single day of a month, for charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub day: u32,
    pub income: i64,
    pub expense: i64,
}

/// Budget ceiling and running spend of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub icon_color: String,
    pub budget_amount: i64,
    pub spent_amount: i64,
}

/// Progress bar state of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Exceeded,
}

/// Derived progress of a budget category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub id: String,
    pub name: String,
    pub budget_amount: i64,
    pub spent_amount: i64,
    pub remaining: i64,
    pub percentage: u32,
    pub status: BudgetStatus,
}

/// Totals across all budget categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetOverview {
    pub total_budget: i64,
    pub total_spent: i64,
    pub total_remaining: i64,
    pub percentage: u32,
    pub categories: Vec<BudgetProgress>,
}

/// Spending wallet (cash, bank account, e-wallet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub balance: i64,
    pub icon: String,
    pub color: String,
    pub kind: String,
}

/// Savings goal with a target balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Saving {
    pub id: String,
    pub name: String,
    pub balance: i64,
    pub target: i64,
    pub icon: String,
}

/// Fund shared between several members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFund {
    pub id: String,
    pub name: String,
    pub balance: i64,
    pub members: u32,
    pub icon: String,
}

/// Whether money was borrowed from or lent to someone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebtKind {
    Borrow,
    Lend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    pub name: String,
    pub amount: i64,
    pub remaining: i64,
    pub kind: DebtKind,
    /// Counterparty name
    pub counterparty: String,
}

/// Aggregated totals of the wallet screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletOverview {
    pub total_assets: i64,
    pub total_debts: i64,
    pub total_lending: i64,
}

/// Type of transaction amount for styling and display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AmountType {
    Positive,
    Negative,
    Zero,
}

/// Represents a formatted transaction for display purposes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormattedTransaction {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub formatted_amount: String,
    pub amount_type: AmountType,
    pub raw_amount: i64,
    pub date: String,
}

/// Everything the dashboard shows for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOverview {
    pub view: ViewMonth,
    pub grid: CalendarGrid,
    pub summary: PeriodSummary,
    pub expense_by_category: Vec<CategoryTotal>,
}
