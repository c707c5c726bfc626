use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::analytics::bucket::{monthly_bucket, YearMonth};
use crate::core::analytics::category::{category_totals, CategoryTotal};
use crate::core::analytics::daily::{daily_series, DailyPoint};
use crate::domain::{LedgerEntry, TransactionKind};

/// Income against expense for a month, the input of the monthly pie chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

impl KindTotals {
    pub fn from_entries<E: LedgerEntry>(entries: &[E]) -> Self {
        let (income, expense) =
            entries
                .iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), entry| {
                    match entry.kind() {
                        TransactionKind::Income => (inc.saturating_add(entry.amount()), exp),
                        TransactionKind::Expense => (inc, exp.saturating_add(entry.amount())),
                    }
                });
        Self {
            income,
            expense,
            net: income.saturating_sub(expense),
        }
    }
}

/// Everything the monthly dashboard draws, derived in one pass from a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyOverview {
    pub year: i32,
    pub month: u32,
    pub entry_count: usize,
    pub daily: Vec<DailyPoint>,
    pub totals: KindTotals,
    pub expense_by_category: Vec<CategoryTotal>,
    pub income_by_category: Vec<CategoryTotal>,
}

impl MonthlyOverview {
    pub fn compute<E: LedgerEntry>(entries: &[E], reference: NaiveDate) -> Self {
        let month = YearMonth::of(reference);
        let bucket = monthly_bucket(entries, reference);
        let of_kind = |kind: TransactionKind| {
            bucket
                .iter()
                .copied()
                .filter(|entry| entry.kind() == kind)
                .collect::<Vec<_>>()
        };

        Self {
            year: month.year,
            month: month.month,
            entry_count: bucket.len(),
            daily: daily_series(&bucket),
            totals: KindTotals::from_entries(&bucket),
            expense_by_category: category_totals(&of_kind(TransactionKind::Expense)),
            income_by_category: category_totals(&of_kind(TransactionKind::Income)),
        }
    }

    pub fn period(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }
}
