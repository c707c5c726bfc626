//! Category names and the default category catalogue.

use std::borrow::Borrow;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::errors::ValidationError;
use crate::domain::common::{Displayable, NamedEntity};
use crate::domain::transaction::TransactionKind;

/// Free-text category label, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Builds a name from a literal known to be non-empty (catalogue and seed data).
    pub(crate) fn from_static(name: &'static str) -> Self {
        debug_assert!(!name.trim().is_empty());
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CategoryName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategoryName> for String {
    fn from(name: CategoryName) -> Self {
        name.0
    }
}

/// Catalogue entry keyed by `(kind, name)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: u32,
    pub kind: TransactionKind,
    pub name: CategoryName,
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

const DEFAULT_INCOME: &[&str] = &[
    "Salary",
    "Freelance",
    "Investment",
    "Rental",
    "Gift",
    "Bonus",
    "Pension",
    "Sale",
    "Interest",
    "Other Income",
];

const DEFAULT_EXPENSE: &[&str] = &[
    "Food",
    "Rent",
    "Utilities",
    "Transportation",
    "Entertainment",
    "Shopping",
    "Healthcare",
    "Education",
    "Loan",
    "Other Expenses",
];

static DEFAULT_CATALOG: Lazy<CategoryCatalog> = Lazy::new(|| {
    let income = DEFAULT_INCOME
        .iter()
        .map(|name| (TransactionKind::Income, *name));
    let expense = DEFAULT_EXPENSE
        .iter()
        .map(|name| (TransactionKind::Expense, *name));
    let entries = income
        .chain(expense)
        .zip(1u32..)
        .map(|((kind, name), id)| Category {
            id,
            kind,
            name: CategoryName::from_static(name),
        })
        .collect();
    CategoryCatalog { entries }
});

/// Lookup table of known categories.
///
/// Transactions refer to categories by name only; a name missing from the
/// catalogue is still a valid transaction category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCatalog {
    entries: Vec<Category>,
}

impl CategoryCatalog {
    /// The built-in income and expense categories.
    pub fn default_catalog() -> &'static CategoryCatalog {
        &DEFAULT_CATALOG
    }

    pub fn entries(&self) -> &[Category] {
        &self.entries
    }

    /// Categories of `kind`, in catalogue order.
    pub fn for_kind(&self, kind: TransactionKind) -> impl Iterator<Item = &Category> + '_ {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    /// Case-insensitive lookup by `(kind, name)`.
    pub fn lookup(&self, kind: TransactionKind, name: &str) -> Option<&Category> {
        let needle = name.trim();
        self.entries
            .iter()
            .find(|entry| entry.kind == kind && entry.name.as_str().eq_ignore_ascii_case(needle))
    }

    /// Adds a custom entry unless `(kind, name)` is already present.
    pub fn add(&mut self, kind: TransactionKind, name: CategoryName) -> &Category {
        if let Some(pos) = self
            .entries
            .iter()
            .position(|entry| entry.kind == kind && entry.name.as_str().eq_ignore_ascii_case(name.as_str()))
        {
            return &self.entries[pos];
        }
        let id = self.entries.iter().map(|entry| entry.id).max().unwrap_or(0) + 1;
        self.entries.push(Category { id, kind, name });
        &self.entries[self.entries.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_and_non_empty() {
        assert_eq!(CategoryName::new("  Food ").unwrap().as_str(), "Food");
        assert_eq!(
            CategoryName::new("   ").unwrap_err(),
            ValidationError::MissingCategory
        );
    }

    #[test]
    fn default_catalog_has_ten_entries_per_kind() {
        let catalog = CategoryCatalog::default_catalog();
        assert_eq!(catalog.for_kind(TransactionKind::Income).count(), 10);
        assert_eq!(catalog.for_kind(TransactionKind::Expense).count(), 10);
        assert_eq!(catalog.entries()[0].id, 1);
        assert_eq!(catalog.entries()[19].name.as_str(), "Other Expenses");
    }

    #[test]
    fn lookup_is_keyed_by_kind_and_name() {
        let catalog = CategoryCatalog::default_catalog();
        assert!(catalog.lookup(TransactionKind::Expense, "rent").is_some());
        assert!(catalog.lookup(TransactionKind::Income, "Rent").is_none());
    }

    #[test]
    fn add_ignores_duplicates() {
        let mut catalog = CategoryCatalog::default_catalog().clone();
        let before = catalog.entries().len();
        catalog.add(TransactionKind::Expense, CategoryName::new("food").unwrap());
        assert_eq!(catalog.entries().len(), before);
        let pets = catalog
            .add(TransactionKind::Expense, CategoryName::new("Pets").unwrap())
            .id;
        assert_eq!(pets, 21);
    }
}
