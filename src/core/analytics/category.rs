use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{CategoryCatalog, LedgerEntry, TransactionKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFrequency {
    pub category: String,
    pub count: usize,
}

/// Sums amounts per distinct category, in order of first appearance.
///
/// The function does not look at the entry kind; callers filter first when
/// they want expense-only or income-only totals.
pub fn category_totals<E: LedgerEntry>(entries: &[E]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        match index.get(entry.category()) {
            Some(&slot) => {
                let total = &mut totals[slot];
                total.total = total.total.saturating_add(entry.amount());
            }
            None => {
                index.insert(entry.category().to_string(), totals.len());
                totals.push(CategoryTotal {
                    category: entry.category().to_string(),
                    total: entry.amount(),
                });
            }
        }
    }

    debug!(categories = totals.len(), "Totalled categories");
    totals
}

/// Counts how often each category of `kind` occurs, most frequent first.
///
/// Ties keep first-occurrence order.
pub fn rank_by_frequency<E: LedgerEntry>(
    entries: &[E],
    kind: TransactionKind,
) -> Vec<CategoryFrequency> {
    let mut ranked: Vec<CategoryFrequency> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries.iter().filter(|entry| entry.kind() == kind) {
        match index.get(entry.category()) {
            Some(&slot) => ranked[slot].count += 1,
            None => {
                index.insert(entry.category(), ranked.len());
                ranked.push(CategoryFrequency {
                    category: entry.category().to_string(),
                    count: 1,
                });
            }
        }
    }

    // Vec::sort_by is stable.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// Up to `limit` category names for `kind`: most used first, then unused
/// catalogue entries in catalogue order.
pub fn suggested_categories<E: LedgerEntry>(
    entries: &[E],
    kind: TransactionKind,
    catalog: &CategoryCatalog,
    limit: usize,
) -> Vec<String> {
    let mut names: Vec<String> = rank_by_frequency(entries, kind)
        .into_iter()
        .map(|freq| freq.category)
        .collect();

    for category in catalog.for_kind(kind) {
        let known = names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(category.name.as_str()));
        if !known {
            names.push(category.name.to_string());
        }
    }

    names.truncate(limit);
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analytics::monthly_bucket;
    use crate::domain::Transaction;
    use crate::ledger::seed_transactions;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn july_expenses(seed: &[Transaction]) -> Vec<&Transaction> {
        monthly_bucket(seed, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
            .into_iter()
            .filter(|txn| txn.is_expense())
            .collect()
    }

    #[test]
    fn totals_follow_first_occurrence_order() {
        let seed = seed_transactions();
        let totals = category_totals(&july_expenses(&seed));
        let pairs: Vec<(&str, Decimal)> = totals
            .iter()
            .map(|t| (t.category.as_str(), t.total))
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
    fn repeated_categories_accumulate() {
        let seed = seed_transactions();
        let totals = category_totals(&seed);
        let rent = totals.iter().find(|t| t.category == "Rent").unwrap();
        assert_eq!(rent.total, dec!(3050));
        assert_eq!(totals.len(), 12);
        assert_eq!(totals[0].category, "Salary");
    }

    #[test]
    fn totals_are_idempotent() {
        let seed = seed_transactions();
        assert_eq!(category_totals(&seed), category_totals(&seed));
    }

    #[test]
    fn ranking_is_stable_on_ties() {
        let seed = seed_transactions();
        let ranked = rank_by_frequency(&seed, TransactionKind::Income);
        let names: Vec<&str> = ranked.iter().map(|f| f.category.as_str()).collect();
        assert_eq!(names, vec!["Salary", "Freelance", "Investment", "Gift"]);
        assert!(ranked.iter().all(|f| f.count == 2));
    }

    #[test]
    fn most_frequent_category_ranks_first() {
        let mut seed = seed_transactions();
        let extra = Transaction::new(
            99,
            TransactionKind::Expense,
            crate::domain::CategoryName::new("Loan").unwrap(),
            dec!(10),
            NaiveDate::from_ymd_opt(2024, 8, 30).unwrap(),
            Default::default(),
        )
        .unwrap();
        seed.push(extra);
        let ranked = rank_by_frequency(&seed, TransactionKind::Expense);
        assert_eq!(ranked[0].category, "Loan");
        assert_eq!(ranked[0].count, 3);
        assert_eq!(ranked[1].category, "Rent");
    }

    #[test]
    fn suggestions_pad_with_unused_catalogue_entries() {
        let seed = seed_transactions();
        let catalog = CategoryCatalog::default_catalog();
        let names = suggested_categories(&seed, TransactionKind::Expense, catalog, 10);
        assert_eq!(names.len(), 10);
        assert_eq!(&names[..2], &["Rent".to_string(), "Food".to_string()]);
        assert_eq!(&names[8..], &["Utilities".to_string(), "Other Expenses".to_string()]);

        let empty: Vec<Transaction> = Vec::new();
        let fallback = suggested_categories(&empty, TransactionKind::Income, catalog, 3);
        assert_eq!(fallback, vec!["Salary", "Freelance", "Investment"]);
    }
}
