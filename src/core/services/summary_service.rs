use chrono::NaiveDate;

use crate::core::analytics::{
    category_totals, daily_series, monthly_bucket, CategoryTotal, DailyPoint, MonthlyOverview,
    OverviewCache,
};
use crate::domain::{Transaction, TransactionKind};
use crate::ledger::Ledger;

/// Monthly dashboard figures derived from the ledger.
pub struct SummaryService;

impl SummaryService {
    pub fn month(ledger: &Ledger, reference: NaiveDate) -> Vec<&Transaction> {
        monthly_bucket(ledger.transactions(), reference)
    }

    pub fn daily(ledger: &Ledger, reference: NaiveDate) -> Vec<DailyPoint> {
        daily_series(&Self::month(ledger, reference))
    }

    /// Category totals for one kind within the reference month.
    pub fn by_category(
        ledger: &Ledger,
        reference: NaiveDate,
        kind: TransactionKind,
    ) -> Vec<CategoryTotal> {
        let of_kind: Vec<&Transaction> = Self::month(ledger, reference)
            .into_iter()
            .filter(|txn| txn.kind == kind)
            .collect();
        category_totals(&of_kind)
    }

    pub fn overview(ledger: &Ledger, reference: NaiveDate) -> MonthlyOverview {
        MonthlyOverview::compute(ledger.transactions(), reference)
    }

    pub fn overview_cached<'c>(
        cache: &'c mut OverviewCache,
        ledger: &Ledger,
        reference: NaiveDate,
    ) -> &'c MonthlyOverview {
        cache.overview(ledger, reference)
    }
}
