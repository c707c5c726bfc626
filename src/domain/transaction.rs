use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::errors::{ParseError, ValidationError};
use crate::currency::CurrencyCode;
use crate::domain::category::CategoryName;
use crate::domain::common::{parse_iso_date, Displayable, Identifiable, LedgerEntry};
use crate::domain::draft::{check_amount_range, DateChoice, TransactionDraft};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(ParseError::InvalidKind {
                input: other.to_string(),
            }),
        }
    }
}

/// A recorded income or expense event.
///
/// Transactions are only ever handed out by shared reference once they sit in
/// a [`crate::ledger::Ledger`], so the positive-amount invariant checked in
/// [`Transaction::new`] holds for their whole lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: CategoryName,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub currency: CurrencyCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Transaction {
    pub fn new(
        id: u64,
        kind: TransactionKind,
        category: CategoryName,
        amount: Decimal,
        date: NaiveDate,
        currency: CurrencyCode,
    ) -> Result<Self, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        check_amount_range(amount)?;
        Ok(Self {
            id,
            kind,
            category,
            amount,
            date,
            currency,
            description: None,
            tags: Vec::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "#{} {} {} {} {} on {}",
            self.id, self.kind, self.category, self.amount, self.currency, self.date
        )
    }
}

impl LedgerEntry for Transaction {
    fn kind(&self) -> TransactionKind {
        self.kind
    }

    fn category(&self) -> &str {
        self.category.as_str()
    }

    fn amount(&self) -> Decimal {
        self.amount
    }

    fn currency(&self) -> &str {
        self.currency.as_str()
    }

    fn date(&self) -> Result<NaiveDate, ParseError> {
        Ok(self.date)
    }

    fn date_text(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// An unvalidated transaction row, typically read from a CSV export.
///
/// Field names follow the export header `Type,Category,Amount,Date,Currency`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawTransaction {
    #[serde(rename = "Type")]
    pub kind: TransactionKind,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount")]
    pub amount: Decimal,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Currency", default)]
    pub currency: String,
}

impl RawTransaction {
    /// Converts the record into a draft so it passes the same validation as typed entries.
    pub fn to_draft(&self) -> TransactionDraft {
        let mut draft = TransactionDraft::new(
            self.kind,
            self.category.clone(),
            self.amount.to_string(),
            DateChoice::SpecificDate(self.date.clone()),
        );
        if !self.currency.trim().is_empty() {
            draft = draft.with_currency(self.currency.clone());
        }
        draft
    }
}

impl LedgerEntry for RawTransaction {
    fn kind(&self) -> TransactionKind {
        self.kind
    }

    fn category(&self) -> &str {
        self.category.trim()
    }

    fn amount(&self) -> Decimal {
        self.amount
    }

    fn currency(&self) -> &str {
        self.currency.trim()
    }

    fn date(&self) -> Result<NaiveDate, ParseError> {
        parse_iso_date(&self.date)
    }

    fn date_text(&self) -> String {
        self.date.trim().to_string()
    }
}
