//! Period aggregation.
//!
//! Sums transaction amounts into income/expense/net totals for a single day or
//! for every stored key of a month. Income is the sum of amounts `> 0`; expense
//! is the sum of amounts `<= 0` and stays non-positive, so `net = income + expense`.
//! A zero amount is therefore filed under expense.
//!
//! Sums saturate at the `i64` bounds instead of overflowing; the store accepts
//! any `i64` amount.

use std::collections::HashMap;

use shared::{CategoryTotal, DailyPoint, DaySummary, Direction, PeriodSummary, Transaction};
use tracing::{debug, warn};

use crate::domain::date_key::{days_in_month, decode, encode, validate_month, CalendarError};
use crate::storage::TransactionStore;

/// Split a set of transactions into income and expense sums
pub fn summarize<'a, I>(transactions: I) -> DaySummary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(DaySummary::default(), |mut summary, tx| {
            if tx.amount > 0 {
                summary.income = summary.income.saturating_add(tx.amount);
            } else {
                summary.expense = summary.expense.saturating_add(tx.amount);
            }
            summary
        })
}

/// Totals of the transactions filed under one key. Absent keys yield zeros.
pub fn aggregate_day<S>(store: &S, date_key: &str) -> DaySummary
where
    S: TransactionStore + ?Sized,
{
    summarize(&store.get(date_key))
}

/// Totals of every stored key whose decoded year/month match the period.
///
/// Works from the stored keys rather than days `1..=N`, so a key naming a
/// nonexistent day (`2024-02-30`) still counts toward February. Keys that do
/// not decode are logged and skipped.
pub fn aggregate_month<S>(store: &S, year: i32, month: u32) -> PeriodSummary
where
    S: TransactionStore + ?Sized,
{
    let mut income: i64 = 0;
    let mut expense: i64 = 0;

    for key in month_keys(store, year, month) {
        let day = aggregate_day(store, &key);
        income = income.saturating_add(day.income);
        expense = expense.saturating_add(day.expense);
    }

    debug!(
        "Month {}/{} totals: income={}, expense={}",
        month + 1,
        year,
        income,
        expense
    );

    PeriodSummary {
        income,
        expense,
        net: income + expense,
    }
}

/// Per-category totals of one direction for a month, largest magnitude first.
///
/// Ties are broken by category id so the order is stable.
pub fn category_totals<S>(
    store: &S,
    year: i32,
    month: u32,
    direction: Direction,
) -> Vec<CategoryTotal>
where
    S: TransactionStore + ?Sized,
{
    let mut by_category: HashMap<String, (i64, usize)> = HashMap::new();
    for key in month_keys(store, year, month) {
        for tx in store.get(&key) {
            if tx.direction() != direction {
                continue;
            }
            let entry = by_category.entry(tx.category.clone()).or_insert((0, 0));
            entry.0 = entry.0.saturating_add(tx.amount);
            entry.1 += 1;
        }
    }

    let direction_total =
        saturating_sum(by_category.values().map(|(amount, _)| amount.saturating_abs()));

    let mut totals: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, (amount, transaction_count))| CategoryTotal {
            category,
            amount,
            transaction_count,
            share_percent: percent_of(amount.saturating_abs(), direction_total),
        })
        .collect();

    totals.sort_by(|a, b| {
        b.amount
            .unsigned_abs()
            .cmp(&a.amount.unsigned_abs())
            .then_with(|| a.category.cmp(&b.category))
    });
    totals
}

/// Income and expense of every day of a month, for bar charts
pub fn daily_series<S>(store: &S, year: i32, month: u32) -> Result<Vec<DailyPoint>, CalendarError>
where
    S: TransactionStore + ?Sized,
{
    validate_month(year, month)?;
    let days = days_in_month(year, month)?;

    (1..=days)
        .map(|day| {
            let key = encode(year, month, day)?;
            let summary = aggregate_day(store, key.as_str());
            Ok(DailyPoint {
                day,
                income: summary.income,
                expense: summary.expense,
            })
        })
        .collect()
}

/// Sum that clamps at the `i64` bounds instead of overflowing
pub fn saturating_sum<I>(values: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    values.into_iter().fold(0, i64::saturating_add)
}

/// Whole-percent share, rounded half up. Zero when the whole is zero.
pub fn percent_of(part: i64, whole: i64) -> u32 {
    if whole <= 0 || part <= 0 {
        return 0;
    }
    let rounded = (part as i128 * 200 + whole as i128) / (whole as i128 * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

fn month_keys<S>(store: &S, year: i32, month: u32) -> Vec<String>
where
    S: TransactionStore + ?Sized,
{
    store
        .keys_for_month(year, month)
        .into_iter()
        .filter(|key| match decode(key) {
            Ok(parts) => parts.year == year && parts.month == month,
            Err(e) => {
                warn!("Skipping malformed key during aggregation: {}", e);
                false
            }
        })
        .collect()
}
