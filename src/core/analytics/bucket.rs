use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::errors::ParseError;
use crate::domain::LedgerEntry;

/// A calendar month, the unit every bucket is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// First day of the month; `None` only for out-of-range years.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ParseError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ParseError::InvalidMonth {
            input: trimmed.to_string(),
        };
        let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let candidate = Self { year, month };
        candidate.first_day().map(|_| candidate).ok_or_else(invalid)
    }
}

/// True when the entry's date falls in the same calendar month and year as `reference`.
///
/// Entries whose date cannot be parsed never match.
pub fn in_month<E: LedgerEntry>(entry: &E, reference: NaiveDate) -> bool {
    entry
        .date()
        .map(|date| YearMonth::of(reference).contains(date))
        .unwrap_or(false)
}

/// Entries dated in the calendar month containing `reference`, in input order.
pub fn monthly_bucket<E: LedgerEntry>(entries: &[E], reference: NaiveDate) -> Vec<&E> {
    let bucket: Vec<&E> = entries
        .iter()
        .filter(|entry| in_month(*entry, reference))
        .collect();
    debug!(
        month = %YearMonth::of(reference),
        total = entries.len(),
        matched = bucket.len(),
        "Bucketed entries by month"
    );
    bucket
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawTransaction, TransactionKind};
    use crate::ledger::seed_transactions;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn raw(date: &str) -> RawTransaction {
        RawTransaction {
            kind: TransactionKind::Expense,
            category: "Food".into(),
            amount: dec!(10),
            date: date.into(),
            currency: "USD".into(),
        }
    }

    #[test]
    fn bucket_matches_calendar_month_not_rolling_window() {
        let seed = seed_transactions();
        let bucket = monthly_bucket(&seed, date(2024, 8, 2));
        assert_eq!(bucket.len(), 12);
        assert!(bucket.iter().all(|txn| txn.date.month() == 8));
        // 2024-07-28 is within 30 days of the reference but in another month.
        assert!(bucket.iter().all(|txn| txn.id > 12));
    }

    #[test]
    fn same_month_of_another_year_is_excluded() {
        let seed = seed_transactions();
        assert!(monthly_bucket(&seed, date(2023, 7, 15)).is_empty());
    }

    #[test]
    fn empty_input_yields_empty_bucket() {
        let empty: Vec<RawTransaction> = Vec::new();
        assert!(monthly_bucket(&empty, date(2024, 7, 1)).is_empty());
    }

    #[test]
    fn malformed_dates_are_excluded_without_error() {
        let entries = vec![raw("2024-07-05"), raw("not-a-date"), raw("2024-07-99"), raw("")];
        let bucket = monthly_bucket(&entries, date(2024, 7, 1));
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket[0].date, "2024-07-05");
    }

    #[test]
    fn year_month_parses_and_displays() {
        let ym: YearMonth = "2024-07".parse().unwrap();
        assert_eq!(ym, YearMonth { year: 2024, month: 7 });
        assert_eq!(ym.to_string(), "2024-07");
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("July".parse::<YearMonth>().is_err());
    }
}
