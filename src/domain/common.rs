use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::errors::ParseError;
use crate::domain::transaction::TransactionKind;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> u64;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Read-only view shared by stored transactions and not-yet-validated records.
///
/// The analytics functions are written against this trait so that the same
/// bucketing and totalling code runs over the ledger and over imported rows.
/// Only `date` can fail: raw records keep their date as text.
pub trait LedgerEntry {
    fn kind(&self) -> TransactionKind;
    fn category(&self) -> &str;
    fn amount(&self) -> Decimal;
    fn currency(&self) -> &str;
    fn date(&self) -> Result<NaiveDate, ParseError>;
    /// Date as text, as shown in listings and written to exports.
    fn date_text(&self) -> String;
}

impl<T: LedgerEntry + ?Sized> LedgerEntry for &T {
    fn kind(&self) -> TransactionKind {
        (**self).kind()
    }

    fn category(&self) -> &str {
        (**self).category()
    }

    fn amount(&self) -> Decimal {
        (**self).amount()
    }

    fn currency(&self) -> &str {
        (**self).currency()
    }

    fn date(&self) -> Result<NaiveDate, ParseError> {
        (**self).date()
    }

    fn date_text(&self) -> String {
        (**self).date_text()
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// The text must be exactly ten characters with zero-padded fields; chrono
/// alone would also take `2024-7-5` or `+2024-07-05`.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = input.trim();
    let invalid = || ParseError::InvalidDate {
        input: trimmed.to_string(),
    };
    if !has_iso_date_shape(trimmed) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())
}

fn has_iso_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use rust_decimal;
pub use serde;
