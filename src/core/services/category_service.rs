//! Category catalogue access and usage-ranked suggestions.

use crate::core::analytics::{rank_by_frequency, suggested_categories, CategoryFrequency};
use crate::domain::{Category, CategoryCatalog, TransactionKind};
use crate::ledger::Ledger;

pub struct CategoryService;

impl CategoryService {
    pub fn catalog() -> &'static CategoryCatalog {
        CategoryCatalog::default_catalog()
    }

    pub fn list(kind: TransactionKind) -> Vec<&'static Category> {
        Self::catalog().for_kind(kind).collect()
    }

    /// The `limit` categories to offer first when recording a `kind` transaction.
    ///
    /// Only the order of the offered list changes; a category the user
    /// already picked stays picked.
    pub fn suggestions(ledger: &Ledger, kind: TransactionKind, limit: usize) -> Vec<String> {
        suggested_categories(ledger.transactions(), kind, Self::catalog(), limit)
    }

    pub fn usage(ledger: &Ledger, kind: TransactionKind) -> Vec<CategoryFrequency> {
        rank_by_frequency(ledger.transactions(), kind)
    }

    /// True when `name` is a built-in category of `kind`.
    pub fn is_known(kind: TransactionKind, name: &str) -> bool {
        Self::catalog().lookup(kind, name).is_some()
    }
}
