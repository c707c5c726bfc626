use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::services::SummaryService;
use crate::domain::TransactionKind;
use crate::ledger::Ledger;

#[test]
fn month_bucket_for_mid_july_is_first_twelve_ids() {
    let ledger = Ledger::with_seed_data();
    let reference = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
    let ids: Vec<u64> = SummaryService::month(&ledger, reference)
        .iter()
        .map(|txn| txn.id)
        .collect();
    assert_eq!(ids, (1..=12).collect::<Vec<u64>>());
}

#[test]
fn daily_series_totals_match_overview_totals() {
    let ledger = Ledger::with_seed_data();
    let reference = NaiveDate::from_ymd_opt(2024, 8, 20).unwrap();
    let overview = SummaryService::overview(&ledger, reference);
    let income: Decimal = overview.daily.iter().map(|p| p.income_total).sum();
    let expense: Decimal = overview.daily.iter().map(|p| p.expense_total).sum();
    assert_eq!(income, overview.totals.income);
    assert_eq!(expense, overview.totals.expense);
    assert_eq!(overview.totals.income, dec!(9050));
    assert_eq!(overview.totals.expense, dec!(4140));
}

#[test]
fn empty_month_yields_empty_aggregates() {
    let ledger = Ledger::with_seed_data();
    let reference = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
    assert!(SummaryService::month(&ledger, reference).is_empty());
    assert!(SummaryService::daily(&ledger, reference).is_empty());
    assert!(SummaryService::by_category(&ledger, reference, TransactionKind::Expense).is_empty());
}
