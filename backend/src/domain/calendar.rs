//! Calendar domain logic.
//!
//! Turns the sparse, date-keyed transaction store into the month grid shown by
//! the dashboard: leading padding cells to align the 1st on its weekday column,
//! then one annotated cell per day. All computations here are pure reads of the
//! store; selection state belongs to the caller.

use chrono::NaiveDate;
use shared::{CalendarGrid, DayCell, DayDetail, Direction, ViewMonth};
use tracing::{debug, info};

use crate::domain::aggregation::{aggregate_day, summarize};
use crate::domain::date_key::{
    days_in_month, decode, encode, first_weekday_of_month, validate_month, CalendarError, DateKey,
};
use crate::storage::TransactionStore;

/// Calendar service that handles all calendar-related business logic
#[derive(Debug, Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Build the grid of a month (zero-based) from the store contents.
    ///
    /// Day cells carry `daily_total` only when the day has transactions, so a
    /// day whose transactions net to zero stays distinguishable from an empty day.
    pub fn build_grid<S>(
        &self,
        store: &S,
        year: i32,
        month: u32,
    ) -> Result<CalendarGrid, CalendarError>
    where
        S: TransactionStore + ?Sized,
    {
        validate_month(year, month)?;
        let days = days_in_month(year, month)?;
        let first_weekday = first_weekday_of_month(year, month)?;

        debug!(
            "🗓️ CALENDAR: Building grid for {}/{}: {} days, first weekday {}",
            month + 1,
            year,
            days,
            first_weekday
        );

        let mut cells = Vec::with_capacity((first_weekday + days) as usize);
        cells.extend((0..first_weekday).map(|_| DayCell::padding()));

        for day in 1..=days {
            let key = encode(year, month, day)?;
            let has_data = store.count(key.as_str()) > 0;
            let daily_total = if has_data {
                Some(aggregate_day(store, key.as_str()).net())
            } else {
                None
            };
            cells.push(DayCell {
                day: Some(day),
                date_key: key.into(),
                has_data,
                daily_total,
            });
        }

        let active_days = cells.iter().filter(|cell| cell.has_data).count();
        info!(
            "🗓️ CALENDAR: Generated grid for {}/{} with {} cells, {} active days",
            month + 1,
            year,
            cells.len(),
            active_days
        );

        Ok(CalendarGrid {
            year,
            month,
            first_weekday,
            cells,
        })
    }

    pub fn build_grid_for<S>(
        &self,
        store: &S,
        view: ViewMonth,
    ) -> Result<CalendarGrid, CalendarError>
    where
        S: TransactionStore + ?Sized,
    {
        self.build_grid(store, view.year, view.month)
    }

    /// Summary and list of the selected day.
    ///
    /// With a tab, `Expense` keeps amounts `< 0` and `Income` keeps amounts
    /// `> 0`; zero amounts show under neither tab. The summary always covers
    /// every transaction of the day.
    pub fn day_detail<S>(&self, store: &S, date_key: &str, tab: Option<Direction>) -> DayDetail
    where
        S: TransactionStore + ?Sized,
    {
        let all = store.get(date_key);
        let summary = summarize(&all);
        let transactions = all
            .into_iter()
            .filter(|tx| match tab {
                Some(Direction::Expense) => tx.amount < 0,
                Some(Direction::Income) => tx.amount > 0,
                None => true,
            })
            .collect();

        DayDetail {
            date_key: date_key.to_string(),
            summary,
            transactions,
        }
    }

    /// Header label of a month, e.g. `3/2024`
    pub fn month_label(&self, view: ViewMonth) -> String {
        format!("{}/{}", view.month + 1, view.year)
    }

    /// Zero-padded header label, e.g. `03/2024`
    pub fn padded_month_label(&self, view: ViewMonth) -> String {
        format!("{:02}/{}", view.month + 1, view.year)
    }

    /// Day range of a month, e.g. `(01/03-31/03)`
    pub fn month_range_label(&self, view: ViewMonth) -> Result<String, CalendarError> {
        let days = days_in_month(view.year, view.month)?;
        Ok(format!(
            "(01/{:02}-{}/{:02})",
            view.month + 1,
            days,
            view.month + 1
        ))
    }

    /// Get the human-readable name for a zero-based month
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            0 => "January", 1 => "February", 2 => "March", 3 => "April",
            4 => "May", 5 => "June", 6 => "July", 7 => "August",
            8 => "September", 9 => "October", 10 => "November", 11 => "December",
            _ => "Invalid Month",
        }
    }

    /// Format a date key for human-readable display
    pub fn format_date_for_display(&self, date_key: &str) -> String {
        match decode(date_key) {
            Ok(parts) => format!("{} {}, {}", self.month_name(parts.month), parts.day, parts.year),
            // Fallback to original string
            Err(_) => date_key.to_string(),
        }
    }

    /// Short label of the date picker: `TODAY` or `DD/MM`
    pub fn picker_label(&self, selected: &DateKey, today: NaiveDate) -> String {
        if selected.to_naive_date() == today {
            return "TODAY".to_string();
        }
        let parts = selected.parts();
        format!("{:02}/{:02}", parts.day, parts.month + 1)
    }
}
