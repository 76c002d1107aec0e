//! Date key codec.
//!
//! A date key is the canonical `YYYY-MM-DD` string under which transactions are
//! filed. Keys are zero padded, so lexicographic order equals calendar order.
//!
//! Months are zero-based throughout this crate (0 = January), matching the
//! calendar grid and navigation code. Only the textual key uses 1-based months.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest year a date key can carry (four digit field)
pub const MIN_YEAR: i32 = 1;
/// Largest year a date key can carry (four digit field)
pub const MAX_YEAR: i32 = 9999;

/// Errors raised by calendar computations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid date: year {year}, month index {month}, day {day}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("Invalid month: year {year}, month index {month}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("Malformed date key: {0:?}")]
    MalformedKey(String),
}

/// Raw components of a decoded key. Not range checked: `2024-02-30` decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyParts {
    pub year: i32,
    /// Zero-based month
    pub month: u32,
    pub day: u32,
}

/// A validated date key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey {
    key: String,
    date: NaiveDate,
}

impl DateKey {
    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn parts(&self) -> KeyParts {
        KeyParts {
            year: self.date.year(),
            month: self.date.month0(),
            day: self.date.day(),
        }
    }

    pub fn to_naive_date(&self) -> NaiveDate {
        self.date
    }

    pub fn from_naive_date(date: NaiveDate) -> Result<Self, CalendarError> {
        encode(date.year(), date.month0(), date.day())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl AsRef<str> for DateKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl FromStr for DateKey {
    type Err = CalendarError;

    /// Strict parse: the key must be well formed and name a real day.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = decode(s)?;
        encode(parts.year, parts.month, parts.day)
    }
}

impl TryFrom<String> for DateKey {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.key
    }
}

/// Build the key of a calendar day, rejecting out-of-range components
pub fn encode(year: i32, month: u32, day: u32) -> Result<DateKey, CalendarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || month > 11 {
        return Err(CalendarError::InvalidDate { year, month, day });
    }
    let date = NaiveDate::from_ymd_opt(year, month + 1, day)
        .ok_or(CalendarError::InvalidDate { year, month, day })?;
    Ok(DateKey {
        key: format!("{:04}-{:02}-{:02}", year, month + 1, day),
        date,
    })
}

/// Split a key of the form `\d{4}-\d{2}-\d{2}` into its components
pub fn decode(key: &str) -> Result<KeyParts, CalendarError> {
    let malformed = || CalendarError::MalformedKey(key.to_string());

    let bytes = key.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(malformed());
    }
    let all_digits = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 4 && *i != 7)
        .all(|(_, b)| b.is_ascii_digit());
    if !all_digits {
        return Err(malformed());
    }

    let year: i32 = key[0..4].parse().map_err(|_| malformed())?;
    let month: u32 = key[5..7].parse().map_err(|_| malformed())?;
    let day: u32 = key[8..10].parse().map_err(|_| malformed())?;

    // "00" has no zero-based month index
    if month == 0 {
        return Err(malformed());
    }

    Ok(KeyParts {
        year,
        month: month - 1,
        day,
    })
}

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Get the number of days in a given month (zero-based) of a year
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let days = match month {
        1 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        3 | 5 | 8 | 10 => 30,
        0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
        _ => return Err(CalendarError::InvalidMonth { year, month }),
    };
    Ok(days)
}

/// Get the weekday of the 1st of a month (0 = Sunday, 1 = Monday, etc.)
pub fn first_weekday_of_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    if month > 11 {
        return Err(CalendarError::InvalidMonth { year, month });
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .map(|date| date.weekday().num_days_from_sunday())
        .ok_or(CalendarError::InvalidMonth { year, month })
}

/// Reject a year/month pair that cannot be shown as a calendar month
pub fn validate_month(year: i32, month: u32) -> Result<(), CalendarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || month > 11 {
        return Err(CalendarError::InvalidMonth { year, month });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_pads_month_and_day() {
        assert_eq!(encode(2024, 2, 5).unwrap().as_str(), "2024-03-05");
        assert_eq!(encode(2024, 11, 31).unwrap().as_str(), "2024-12-31");
        assert_eq!(encode(987, 0, 1).unwrap().as_str(), "0987-01-01");
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        assert_eq!(
            encode(2024, 12, 1),
            Err(CalendarError::InvalidDate { year: 2024, month: 12, day: 1 })
        );
        assert!(encode(2024, 0, 0).is_err());
        assert!(encode(2023, 1, 29).is_err()); // Feb 29 in a common year
        assert!(encode(2024, 1, 29).is_ok());
        assert!(encode(2024, 3, 31).is_err()); // April has 30 days
        assert!(encode(0, 0, 1).is_err());
        assert!(encode(10_000, 0, 1).is_err());
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            decode("2024-03-05").unwrap(),
            KeyParts { year: 2024, month: 2, day: 5 }
        );
        // Not range checked, typo days still decode
        assert_eq!(
            decode("2024-02-30").unwrap(),
            KeyParts { year: 2024, month: 1, day: 30 }
        );
    }

    #[test]
    fn test_decode_malformed() {
        let malformed = [
            "",
            "2024-3-05",
            "2024/03/05",
            "24-03-05",
            "2024-03-5x",
            "2024-00-10",
            "２０２４-03-05",
            "2024-03-05T00:00",
        ];
        for key in malformed {
            assert_eq!(
                decode(key),
                Err(CalendarError::MalformedKey(key.to_string())),
                "key {:?} should be malformed",
                key
            );
        }
    }

    #[test]
    fn test_round_trip_every_day_of_leap_year() {
        for month in 0..12 {
            for day in 1..=days_in_month(2024, month).unwrap() {
                let key = encode(2024, month, day).unwrap();
                assert_eq!(decode(key.as_str()).unwrap(), KeyParts { year: 2024, month, day });
            }
        }
    }

    #[test]
    fn test_keys_sort_in_calendar_order() {
        let mut keys = vec![
            encode(2024, 9, 1).unwrap(),
            encode(2023, 11, 31).unwrap(),
            encode(2024, 1, 29).unwrap(),
            encode(2024, 1, 3).unwrap(),
        ];
        keys.sort();
        let sorted: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        assert_eq!(sorted, vec!["2023-12-31", "2024-02-03", "2024-02-29", "2024-10-01"]);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1).unwrap(), 29); // February (leap year)
        assert_eq!(days_in_month(2023, 1).unwrap(), 28); // February (non-leap)
        assert_eq!(days_in_month(2025, 0).unwrap(), 31); // January
        assert_eq!(days_in_month(2025, 3).unwrap(), 30); // April
        assert_eq!(days_in_month(1900, 1).unwrap(), 28);
        assert_eq!(days_in_month(2000, 1).unwrap(), 29);
        assert!(days_in_month(2025, 12).is_err());
    }

    #[test]
    fn test_first_weekday_of_month() {
        assert_eq!(first_weekday_of_month(2024, 2).unwrap(), 5); // March 1 2024 is a Friday
        assert_eq!(first_weekday_of_month(2025, 5).unwrap(), 0); // June 1 2025 is a Sunday
        assert_eq!(first_weekday_of_month(2024, 8).unwrap(), 0); // September 1 2024 is a Sunday
        assert!(first_weekday_of_month(2024, 12).is_err());
    }

    #[test]
    fn test_date_key_from_str_is_strict() {
        assert!("2024-02-30".parse::<DateKey>().is_err());
        assert_eq!("2024-02-29".parse::<DateKey>().unwrap().as_str(), "2024-02-29");
    }

    #[test]
    fn test_date_key_naive_date_conversion() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let key = DateKey::from_naive_date(date).unwrap();
        assert_eq!(key.as_str(), "2024-03-05");
        assert_eq!(key.to_naive_date(), date);
        assert_eq!(key.parts(), KeyParts { year: 2024, month: 2, day: 5 });
    }

    #[test]
    fn test_date_key_serde() {
        let key = encode(2024, 2, 5).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-03-05\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DateKey>("\"2024-13-01\"").is_err());
    }
}
