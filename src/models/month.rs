//! Budget month representation
//!
//! Budgets are keyed by calendar month in `YYYY-MM` form, which is also how
//! they are stored in the Budget_Monthly table.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month (e.g. "2025-10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    /// Create a month, validating the month number
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's date
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// The month containing the given date
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        // month is validated to 1..=12, so day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        next.unwrap_or(NaiveDate::MAX) - chrono::Duration::days(1)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The previous calendar month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Human-readable name (e.g. "October 2025")
    pub fn display_name(&self) -> String {
        self.start_date().format("%B %Y").to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        Self::new(year, month)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month number: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let month: Month = "2025-10".parse().unwrap();
        assert_eq!(month, Month::new(2025, 10).unwrap());
        assert_eq!(month.to_string(), "2025-10");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("2025".parse::<Month>().is_err());
        assert!("2025-13".parse::<Month>().is_err());
        assert!("2025-0".parse::<Month>().is_err());
        assert!("abcd-ef".parse::<Month>().is_err());
    }

    #[test]
    fn test_date_bounds() {
        let month = Month::new(2025, 2).unwrap();
        assert_eq!(month.start_date(), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(month.end_date(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());

        let december = Month::new(2024, 12).unwrap();
        assert_eq!(
            december.end_date(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_contains() {
        let month = Month::new(2025, 10).unwrap();
        assert!(month.contains(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()));
        assert!(month.contains(NaiveDate::from_ymd_opt(2025, 10, 31).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()));
    }

    #[test]
    fn test_prev_wraps_year() {
        let january = Month::new(2025, 1).unwrap();
        assert_eq!(january.prev(), Month::new(2024, 12).unwrap());
    }

    #[test]
    fn test_display_name() {
        let month = Month::new(2025, 1).unwrap();
        assert_eq!(month.display_name(), "January 2025");
    }
}
