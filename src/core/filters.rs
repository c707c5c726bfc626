//! Free-text search and structured filters for transaction listings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::errors::ExpenseError;
use crate::domain::{LedgerEntry, TransactionKind};

/// Inclusive date bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ExpenseError> {
        if end < start {
            return Err(ExpenseError::InvalidInput(format!(
                "date range ends ({end}) before it starts ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Criteria combined with AND; a `None` or empty field does not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub kind: Option<TransactionKind>,
    pub date_range: Option<DateRange>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    /// Matched case-insensitively.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn between(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn min_amount(mut self, amount: Decimal) -> Self {
        self.min_amount = Some(amount);
        self
    }

    pub fn max_amount(mut self, amount: Decimal) -> Self {
        self.max_amount = Some(amount);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches<E: LedgerEntry>(&self, entry: &E) -> bool {
        if self.kind.is_some_and(|kind| kind != entry.kind()) {
            return false;
        }
        if let Some(range) = self.date_range {
            // An unreadable date cannot be shown to fall inside the range.
            match entry.date() {
                Ok(date) if range.contains(date) => {}
                _ => return false,
            }
        }
        if self.min_amount.is_some_and(|min| entry.amount() < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| entry.amount() > max) {
            return false;
        }
        self.categories.is_empty()
            || self
                .categories
                .iter()
                .any(|wanted| wanted.trim().eq_ignore_ascii_case(entry.category()))
    }

    pub fn apply<'a, E: LedgerEntry>(&self, entries: &'a [E]) -> Vec<&'a E> {
        entries.iter().filter(|entry| self.matches(*entry)).collect()
    }
}

/// Case-insensitive substring match over category, type, amount, date and currency.
pub fn matches_query<E: LedgerEntry>(entry: &E, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        entry.category().to_lowercase(),
        entry.kind().as_str().to_string(),
        entry.amount().to_string(),
        entry.date_text().to_lowercase(),
        entry.currency().to_lowercase(),
    ]
    .iter()
    .any(|field| field.contains(&needle))
}

/// Entries matching `query`, in input order. An empty query keeps everything.
pub fn search<'a, E: LedgerEntry>(entries: &'a [E], query: &str) -> Vec<&'a E> {
    entries
        .iter()
        .filter(|entry| matches_query(*entry, query))
        .collect()
}
