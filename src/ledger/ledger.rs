use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::errors::ValidationError;
use crate::currency::CurrencyCode;
use crate::domain::{CategoryName, Transaction, TransactionDraft};
use crate::ledger::seed::seed_transactions;

/// Owns the session's transactions and per-category budgets.
///
/// Transactions are append-only: the ledger never hands out mutable access to
/// a stored transaction. Every mutation bumps [`Ledger::revision`], which the
/// analytics cache uses as the identity of the transaction list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    #[serde(default)]
    budgets: BTreeMap<CategoryName, Decimal>,
    next_id: u64,
    revision: u64,
    #[serde(default)]
    default_currency: CurrencyCode,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            budgets: BTreeMap::new(),
            next_id: 1,
            revision: 0,
            default_currency: CurrencyCode::default(),
        }
    }

    /// Ledger preloaded with the July/August 2024 demo transactions (ids 1–24).
    pub fn with_seed_data() -> Self {
        Self::from_transactions(seed_transactions())
    }

    /// Wraps existing transactions; new ids continue after the highest one present.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let next_id = transactions.iter().map(|txn| txn.id).max().unwrap_or(0) + 1;
        Self {
            transactions,
            next_id,
            ..Self::new()
        }
    }

    pub fn with_default_currency(mut self, currency: CurrencyCode) -> Self {
        self.default_currency = currency;
        self
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn default_currency(&self) -> &CurrencyCode {
        &self.default_currency
    }

    /// Validates `draft` against `today` and appends it.
    ///
    /// On error nothing is stored and neither the id counter nor the revision
    /// moves.
    pub fn append(
        &mut self,
        draft: &TransactionDraft,
        today: NaiveDate,
    ) -> Result<&Transaction, ValidationError> {
        let valid = match draft.validate(today) {
            Ok(valid) => valid,
            Err(err) => {
                warn!(rule = %err, kind = %draft.kind, "Rejected transaction draft");
                return Err(err);
            }
        };
        let currency = valid
            .currency
            .unwrap_or_else(|| self.default_currency.clone());
        let mut transaction = Transaction::new(
            self.next_id,
            valid.kind,
            valid.category,
            valid.amount,
            valid.date,
            currency,
        )?
        .with_tags(valid.tags);
        transaction.description = valid.description;

        info!(
            id = transaction.id,
            kind = %transaction.kind,
            category = %transaction.category,
            amount = %transaction.amount,
            date = %transaction.date,
            "Appended transaction"
        );
        self.next_id += 1;
        self.revision += 1;
        let index = self.transactions.len();
        self.transactions.push(transaction);
        Ok(&self.transactions[index])
    }

    /// Sets (or replaces) the spending budget for `category`.
    pub fn set_budget(
        &mut self,
        category: CategoryName,
        amount: Decimal,
    ) -> Result<(), ValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::NegativeBudget);
        }
        info!(category = %category, amount = %amount, "Budget updated");
        self.budgets.insert(category, amount);
        self.revision += 1;
        Ok(())
    }

    pub fn budget(&self, category: &str) -> Option<Decimal> {
        self.budgets.get(category.trim()).copied()
    }

    pub fn budgets(&self) -> impl Iterator<Item = (&CategoryName, Decimal)> + '_ {
        self.budgets.iter().map(|(name, amount)| (name, *amount))
    }
}
