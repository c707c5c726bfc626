//! Unvalidated transaction input and the rules that gate it into the ledger.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::errors::ValidationError;
use crate::currency::CurrencyCode;
use crate::domain::category::CategoryName;
use crate::domain::common::parse_iso_date;
use crate::domain::transaction::TransactionKind;

/// Which day a draft is booked on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateChoice {
    Today,
    /// Date as typed by the user; parsed during validation.
    SpecificDate(String),
}

impl DateChoice {
    /// `today`, or the typed date if it is a valid `YYYY-MM-DD` calendar date.
    pub fn resolve(&self, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
        match self {
            DateChoice::Today => Ok(today),
            DateChoice::SpecificDate(raw) => {
                parse_iso_date(raw).map_err(|_| ValidationError::InvalidDate {
                    input: raw.trim().to_string(),
                })
            }
        }
    }

    /// Interprets CLI input: `today` (any case) or a literal date.
    pub fn from_input(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("today") {
            DateChoice::Today
        } else {
            DateChoice::SpecificDate(input.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub category: String,
    /// Amount as typed; parsed during validation.
    pub amount: String,
    pub date: DateChoice,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A draft that passed every rule, with its fields in typed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDraft {
    pub kind: TransactionKind,
    pub category: CategoryName,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub currency: Option<CurrencyCode>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

impl TransactionDraft {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: impl Into<String>,
        date: DateChoice,
    ) -> Self {
        Self {
            kind,
            category: category.into(),
            amount: amount.into(),
            date,
            currency: None,
            description: None,
            tags: Vec::new(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.trim().is_empty()).then_some(description);
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

    /// Checks every rule and returns the first violation.
    ///
    /// Rules run in order: amount, date, future expense, category, currency.
    pub fn validate(&self, today: NaiveDate) -> Result<ValidatedDraft, ValidationError> {
        let amount = parse_amount(&self.amount)?;
        let date = self.date.resolve(today)?;
        check_not_future_expense(self.kind, date, today)?;
        let category = CategoryName::new(&self.category)?;
        let currency = self.currency.as_deref().map(CurrencyCode::new).transpose()?;
        Ok(ValidatedDraft {
            kind: self.kind,
            category,
            amount,
            date,
            currency,
            description: self.description.clone(),
            tags: clean_tags(&self.tags),
        })
    }

    /// Every rule the draft violates, in evaluation order.
    pub fn violations(&self, today: NaiveDate) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if let Err(err) = parse_amount(&self.amount) {
            errors.push(err);
        }
        match self.date.resolve(today) {
            Ok(date) => {
                if let Err(err) = check_not_future_expense(self.kind, date, today) {
                    errors.push(err);
                }
            }
            Err(err) => errors.push(err),
        }
        if let Err(err) = CategoryName::new(&self.category) {
            errors.push(err);
        }
        if let Some(Err(err)) = self.currency.as_deref().map(CurrencyCode::new) {
            errors.push(err);
        }
        errors
    }
}

/// Largest amount a single transaction may carry.
///
/// Keeps monthly sums far below the `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Parses a positive, finite decimal amount no larger than [`MAX_AMOUNT`].
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::AmountNotFinite {
            input: trimmed.to_string(),
        })?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    check_amount_range(amount)?;
    Ok(amount)
}

pub(crate) fn check_amount_range(amount: Decimal) -> Result<(), ValidationError> {
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge { max: MAX_AMOUNT });
    }
    Ok(())
}

fn check_not_future_expense(
    kind: TransactionKind,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if kind == TransactionKind::Expense && date > today {
        return Err(ValidationError::FutureExpense { date });
    }
    Ok(())
}

fn clean_tags(tags: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !cleaned.iter().any(|existing| existing == tag) {
            cleaned.push(tag.to_string());
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    fn expense(amount: &str, date: DateChoice) -> TransactionDraft {
        TransactionDraft::new(TransactionKind::Expense, "Food", amount, date)
    }

    #[test]
    fn zero_amount_is_rejected_as_non_positive() {
        let err = expense("0", DateChoice::Today).validate(today()).unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveAmount);
        assert_eq!(err.to_string(), "amount must be positive");
    }

    #[test]
    fn negative_and_non_numeric_amounts_are_rejected() {
        assert_eq!(
            expense("-5", DateChoice::Today).validate(today()),
            Err(ValidationError::NonPositiveAmount)
        );
        for input in ["NaN", "inf", "twelve", ""] {
            assert!(matches!(
                expense(input, DateChoice::Today).validate(today()),
                Err(ValidationError::AmountNotFinite { .. })
            ));
        }
    }

    #[test]
    fn amounts_above_the_cap_are_rejected() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000000));
        let err = expense("50000000000000000000000000000", DateChoice::Today)
            .validate(today())
            .unwrap_err();
        assert_eq!(err, ValidationError::AmountTooLarge { max: MAX_AMOUNT });
        assert_eq!(err.to_string(), "amount cannot exceed 1000000000000000");

        let at_cap = expense("1000000000000000", DateChoice::Today)
            .validate(today())
            .expect("cap itself is allowed");
        assert_eq!(at_cap.amount, MAX_AMOUNT);
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let draft = expense("10", DateChoice::SpecificDate("not-a-date".into()));
        assert_eq!(
            draft.validate(today()),
            Err(ValidationError::InvalidDate {
                input: "not-a-date".into()
            })
        );
    }

    #[test]
    fn future_expense_is_rejected_but_future_income_is_allowed() {
        let tomorrow = DateChoice::SpecificDate("2024-07-16".into());
        assert!(matches!(
            expense("10", tomorrow.clone()).validate(today()),
            Err(ValidationError::FutureExpense { .. })
        ));

        let income = TransactionDraft::new(TransactionKind::Income, "Salary", "10", tomorrow);
        let valid = income.validate(today()).expect("future income is accepted");
        assert_eq!(valid.date, NaiveDate::from_ymd_opt(2024, 7, 16).unwrap());
    }

    #[test]
    fn expense_dated_today_is_accepted() {
        let valid = expense("12.50", DateChoice::Today)
            .validate(today())
            .expect("valid draft");
        assert_eq!(valid.amount, dec!(12.50));
        assert_eq!(valid.date, today());
        assert_eq!(valid.category.as_str(), "Food");
    }

    #[test]
    fn blank_category_is_rejected() {
        let draft = TransactionDraft::new(TransactionKind::Income, "  ", "10", DateChoice::Today);
        assert_eq!(draft.validate(today()), Err(ValidationError::MissingCategory));
    }

    #[test]
    fn violations_collects_every_broken_rule() {
        let draft = TransactionDraft::new(
            TransactionKind::Expense,
            "",
            "0",
            DateChoice::SpecificDate("2024-07-20".into()),
        )
        .with_currency("dollars");
        let violations = draft.violations(today());
        assert_eq!(violations.len(), 4);
        assert_eq!(violations[0], ValidationError::NonPositiveAmount);
        assert!(matches!(violations[1], ValidationError::FutureExpense { .. }));
        assert_eq!(violations[2], ValidationError::MissingCategory);
        assert!(matches!(violations[3], ValidationError::InvalidCurrency { .. }));
    }

    #[test]
    fn tags_are_trimmed_and_deduplicated() {
        let valid = expense("5", DateChoice::Today)
            .with_tags([" lunch", "lunch", "", "work "])
            .validate(today())
            .unwrap();
        assert_eq!(valid.tags, vec!["lunch".to_string(), "work".to_string()]);
    }

    #[test]
    fn date_choice_reads_today_keyword() {
        assert_eq!(DateChoice::from_input("Today"), DateChoice::Today);
        assert_eq!(
            DateChoice::from_input("2024-07-01"),
            DateChoice::SpecificDate("2024-07-01".into())
        );
    }
}
