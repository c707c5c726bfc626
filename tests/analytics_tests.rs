mod common;

use common::{date, mid_july, seeded_ledger};
use expense_core::core::analytics::{
    category_totals, daily_series, in_month, monthly_bucket, KindTotals, MonthlyOverview,
};
use expense_core::domain::{RawTransaction, Transaction, TransactionKind};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn expenses<'a>(entries: &[&'a Transaction]) -> Vec<&'a Transaction> {
    entries
        .iter()
        .copied()
        .filter(|txn| txn.kind == TransactionKind::Expense)
        .collect()
}

#[test]
fn july_reference_selects_first_twelve_seed_transactions() {
    let ledger = seeded_ledger();
    let bucket = monthly_bucket(ledger.transactions(), mid_july());
    let ids: Vec<u64> = bucket.iter().map(|txn| txn.id).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<u64>>());

    let totals = category_totals(&expenses(&bucket));
    let pairs: Vec<(&str, Decimal)> = totals
        .iter()
        .map(|total| (total.category.as_str(), total.total))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Rent", dec!(1500)),
            ("Food", dec!(500)),
            ("Transportation", dec!(200)),
            ("Entertainment", dec!(150)),
            ("Shopping", dec!(300)),
            ("Healthcare", dec!(100)),
            ("Education", dec!(400)),
            ("Loan", dec!(700)),
        ]
    );
}

#[test]
fn bucket_partitions_the_ledger_by_month() {
    let ledger = seeded_ledger();
    for reference in [mid_july(), date(2024, 8, 31), date(2023, 7, 15), date(2024, 9, 1)] {
        let bucket = monthly_bucket(ledger.transactions(), reference);
        let outside = ledger
            .transactions()
            .iter()
            .filter(|txn| !in_month(*txn, reference))
            .count();
        assert_eq!(bucket.len() + outside, ledger.len());
        assert!(bucket.iter().all(|txn| in_month(*txn, reference)));
    }
    assert!(monthly_bucket(ledger.transactions(), date(2023, 7, 15)).is_empty());
}

#[test]
fn daily_series_conserves_kind_totals() {
    let ledger = seeded_ledger();
    for reference in [mid_july(), date(2024, 8, 1)] {
        let bucket = monthly_bucket(ledger.transactions(), reference);
        let series = daily_series(&bucket);
        let totals = KindTotals::from_entries(&bucket);

        let income: Decimal = series.iter().map(|point| point.income_total).sum();
        let expense: Decimal = series.iter().map(|point| point.expense_total).sum();
        assert_eq!(income, totals.income);
        assert_eq!(expense, totals.expense);
        assert!(series.windows(2).all(|pair| pair[0].day < pair[1].day));
    }
}

#[test]
fn aggregators_are_idempotent() {
    let ledger = seeded_ledger();
    let first = MonthlyOverview::compute(ledger.transactions(), date(2024, 8, 10));
    let second = MonthlyOverview::compute(ledger.transactions(), date(2024, 8, 10));
    assert_eq!(first, second);
    assert_eq!(first.totals.income, dec!(9050));
    assert_eq!(first.totals.expense, dec!(4140));
    assert_eq!(first.totals.net, dec!(4910));
}

#[test]
fn category_totals_cover_exactly_the_distinct_categories() {
    let ledger = seeded_ledger();
    let totals = category_totals(ledger.transactions());
    assert_eq!(totals.len(), 12);
    let rent = totals.iter().find(|total| total.category == "Rent").unwrap();
    assert_eq!(rent.total, dec!(3050));
    let grand: Decimal = totals.iter().map(|total| total.total).sum();
    let direct: Decimal = ledger.transactions().iter().map(|txn| txn.amount).sum();
    assert_eq!(grand, direct);
}

#[test]
fn raw_rows_with_bad_dates_are_left_out_of_buckets() {
    let rows = vec![
        RawTransaction {
            kind: TransactionKind::Expense,
            category: "Food".into(),
            amount: dec!(20),
            date: "2024-07-02".into(),
            currency: "USD".into(),
        },
        RawTransaction {
            kind: TransactionKind::Expense,
            category: "Food".into(),
            amount: dec!(99),
            date: "07/02/2024".into(),
            currency: "USD".into(),
        },
    ];
    let bucket = monthly_bucket(&rows, mid_july());
    assert_eq!(bucket.len(), 1);
    let series = daily_series(&rows);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].expense_total, dec!(20));
}

#[test]
fn oversized_amounts_never_reach_the_aggregators() {
    use expense_core::core::clock::FixedClock;
    use expense_core::core::errors::ValidationError;
    use expense_core::core::services::{ServiceError, TransactionService};
    use expense_core::domain::{DateChoice, TransactionDraft, MAX_AMOUNT};

    let mut ledger = seeded_ledger();
    let clock = FixedClock::new(mid_july());
    let huge = TransactionDraft::new(
        TransactionKind::Expense,
        "Food",
        "50000000000000000000000000000",
        DateChoice::Today,
    );
    for _ in 0..2 {
        assert!(matches!(
            TransactionService::add(&mut ledger, &huge, &clock),
            Err(ServiceError::Validation(ValidationError::AmountTooLarge { .. }))
        ));
    }
    let capped = TransactionDraft::new(
        TransactionKind::Expense,
        "Food",
        MAX_AMOUNT.to_string(),
        DateChoice::Today,
    );
    TransactionService::add(&mut ledger, &capped, &clock).unwrap();
    TransactionService::add(&mut ledger, &capped, &clock).unwrap();

    let overview = MonthlyOverview::compute(ledger.transactions(), mid_july());
    assert_eq!(overview.totals.expense, dec!(3850) + MAX_AMOUNT * dec!(2));
}

#[test]
fn raw_rows_near_the_decimal_limit_saturate() {
    let row = |kind| RawTransaction {
        kind,
        category: "Imported".into(),
        amount: Decimal::MAX,
        date: "2024-07-04".into(),
        currency: "USD".into(),
    };
    let rows = vec![row(TransactionKind::Expense), row(TransactionKind::Expense)];

    assert_eq!(category_totals(&rows)[0].total, Decimal::MAX);
    assert_eq!(daily_series(&rows)[0].expense_total, Decimal::MAX);
    let totals = KindTotals::from_entries(&rows);
    assert_eq!(totals.expense, Decimal::MAX);
    assert_eq!(totals.net, Decimal::MIN);
    let overview = MonthlyOverview::compute(&rows, date(2024, 7, 1));
    assert_eq!(overview.expense_by_category[0].total, Decimal::MAX);
}
