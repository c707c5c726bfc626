use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{LedgerEntry, TransactionKind};

/// Income and expense sums for one day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub day: u32,
    pub income_total: Decimal,
    pub expense_total: Decimal,
}

impl DailyPoint {
    fn empty(day: u32) -> Self {
        Self {
            day,
            income_total: Decimal::ZERO,
            expense_total: Decimal::ZERO,
        }
    }

    pub fn net(&self) -> Decimal {
        self.income_total.saturating_sub(self.expense_total)
    }
}

/// Groups a month's entries by day-of-month.
///
/// The series is sparse: only days with at least one entry get a point, and
/// points come out ordered by day. Entries whose date fails to parse are
/// skipped.
pub fn daily_series<E: LedgerEntry>(entries: &[E]) -> Vec<DailyPoint> {
    let mut by_day: BTreeMap<u32, DailyPoint> = BTreeMap::new();
    let mut skipped = 0usize;

    for entry in entries {
        let Ok(date) = entry.date() else {
            skipped += 1;
            continue;
        };
        let point = by_day
            .entry(date.day())
            .or_insert_with(|| DailyPoint::empty(date.day()));
        match entry.kind() {
            TransactionKind::Income => {
                point.income_total = point.income_total.saturating_add(entry.amount())
            }
            TransactionKind::Expense => {
                point.expense_total = point.expense_total.saturating_add(entry.amount())
            }
        }
    }

    debug!(points = by_day.len(), skipped, "Built daily series");
    by_day.into_values().collect()
}
