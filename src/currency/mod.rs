//! Currency labels and amount formatting.
//!
//! Transactions carry a currency code purely as a label; amounts are never
//! converted between currencies.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::errors::ValidationError;

/// Currencies offered by the entry form; any three-letter code is accepted.
pub const SUPPORTED_CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "JPY"];

/// ISO 4217 style currency code, stored upper-case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = code.as_ref().trim();
        if trimmed.len() == 3 && trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(ValidationError::InvalidCurrency {
                input: trimmed.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("USD".into())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

pub fn symbol_for(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        _ => code,
    }
}

pub fn minor_units_for(code: &str) -> u32 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Renders `value` with `precision` decimals and comma digit grouping.
pub fn format_number(value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let body = format!("{:.*}", precision as usize, rounded.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (body.as_str(), None),
    };
    let mut rendered = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        rendered.push('-');
    }
    rendered.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        rendered.push('.');
        rendered.push_str(frac);
    }
    rendered
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats an amount for display, e.g. `$1,500.00` or `¥2,000`.
pub fn format_amount(amount: Decimal, code: &CurrencyCode) -> String {
    let body = format_number(amount.abs(), minor_units_for(code.as_str()));
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{}{body}", symbol_for(code.as_str()))
}
