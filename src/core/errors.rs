use std::result::Result as StdResult;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a transaction draft (or budget) is rejected before touching the ledger.
///
/// Each variant names exactly one rule, so callers can react per rule while
/// the `Display` text stays suitable for showing to a user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount must be a finite number")]
    AmountNotFinite { input: String },
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("amount cannot exceed {max}")]
    AmountTooLarge { max: Decimal },
    #[error("invalid date format: {input}")]
    InvalidDate { input: String },
    #[error("expense date cannot be in the future")]
    FutureExpense { date: NaiveDate },
    #[error("category is required")]
    MissingCategory,
    #[error("invalid currency code `{input}`")]
    InvalidCurrency { input: String },
    #[error("budget must not be negative")]
    NegativeBudget,
}

/// Text that could not be read as a domain value.
///
/// Filtering code recovers from these locally by excluding the offending
/// entry; they are never escalated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid date `{input}` (expected YYYY-MM-DD)")]
    InvalidDate { input: String },
    #[error("invalid amount `{input}`")]
    InvalidAmount { input: String },
    #[error("invalid transaction type `{input}` (expected income or expense)")]
    InvalidKind { input: String },
    #[error("invalid month `{input}` (expected YYYY-MM)")]
    InvalidMonth { input: String },
}

/// Unified error type for the ledger, services and storage edges.
#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, ExpenseError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ExpenseError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        ExpenseError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        ExpenseError::ConfigError(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        ExpenseError::StorageError(err.to_string())
    }
}
