//! Month navigation.
//!
//! Moving the calendar by whole months, rolling over year boundaries in both
//! directions. The grid and the stats header read the same focused month.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Datelike, NaiveDate};
use shared::ViewMonth;
use tracing::{info, warn};

use crate::domain::date_key::{validate_month, CalendarError, MAX_YEAR, MIN_YEAR};

/// First day of the month `delta` months away from `view_date`
pub fn advance_month(view_date: NaiveDate, delta: i32) -> Result<NaiveDate, CalendarError> {
    let view = shift_view(
        ViewMonth {
            year: view_date.year(),
            month: view_date.month0(),
        },
        delta,
    )?;
    NaiveDate::from_ymd_opt(view.year, view.month + 1, 1).ok_or(CalendarError::InvalidMonth {
        year: view.year,
        month: view.month,
    })
}

/// The month `delta` months away from `view`
pub fn shift_view(view: ViewMonth, delta: i32) -> Result<ViewMonth, CalendarError> {
    validate_month(view.year, view.month)?;

    let absolute = i64::from(view.year) * 12 + i64::from(view.month) + i64::from(delta);
    let year = absolute.div_euclid(12);
    let month = absolute.rem_euclid(12) as u32;

    let year = i32::try_from(year)
        .ok()
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
        .ok_or(CalendarError::InvalidMonth {
            year: view.year,
            month: view.month,
        })?;

    Ok(ViewMonth { year, month })
}

/// Holds the month currently focused by the calendar
#[derive(Debug, Clone)]
pub struct MonthNavigator {
    /// Current focus, kept in memory only
    current: Arc<Mutex<ViewMonth>>,
}

impl MonthNavigator {
    /// Start on the current local month
    pub fn new() -> Self {
        Self::starting_at(ViewMonth::default())
    }

    pub fn starting_at(view: ViewMonth) -> Self {
        Self {
            current: Arc::new(Mutex::new(view)),
        }
    }

    pub fn current(&self) -> ViewMonth {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Focus a specific month. Invalid months leave the focus unchanged.
    pub fn set(&self, year: i32, month: u32) -> Result<ViewMonth, CalendarError> {
        validate_month(year, month)?;
        let view = ViewMonth { year, month };
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = view;
        Ok(view)
    }

    /// Move the focus by `delta` months. On error the previous focus is kept.
    pub fn shift(&self, delta: i32) -> Result<ViewMonth, CalendarError> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        match shift_view(*current, delta) {
            Ok(next) => {
                info!(
                    "Calendar focus moved from {}/{} to {}/{}",
                    current.month + 1,
                    current.year,
                    next.month + 1,
                    next.year
                );
                *current = next;
                Ok(next)
            }
            Err(e) => {
                warn!("Rejected calendar navigation by {} months: {}", delta, e);
                Err(e)
            }
        }
    }

    pub fn previous(&self) -> Result<ViewMonth, CalendarError> {
        self.shift(-1)
    }

    pub fn next(&self) -> Result<ViewMonth, CalendarError> {
        self.shift(1)
    }
}

impl Default for MonthNavigator {
    fn default() -> Self {
        Self::new()
    }
}
