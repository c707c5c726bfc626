//! `--flag value` parsing shared by the command handlers.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::cli::core::CommandError;
use crate::core::analytics::YearMonth;
use crate::domain::{parse_iso_date, TransactionKind};

/// Positional words plus `--name value` options and bare `--name` switches.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    pub options: Vec<(&'a str, &'a str)>,
    pub switches: Vec<&'a str>,
}

impl<'a> ParsedArgs<'a> {
    /// `valued` lists the option names (without `--`) that consume the next word.
    pub fn parse(args: &[&'a str], valued: &[&str]) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            let Some(name) = arg.strip_prefix("--") else {
                parsed.positional.push(arg);
                continue;
            };
            if valued.contains(&name) {
                let value = iter.next().ok_or_else(|| {
                    CommandError::InvalidArguments(format!("`--{name}` needs a value"))
                })?;
                parsed.options.push((name, value));
            } else {
                parsed.switches.push(name);
            }
        }
        Ok(parsed)
    }

    /// Last value given for `name`.
    pub fn option(&self, name: &str) -> Option<&'a str> {
        self.options
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    pub fn all(&self, name: &str) -> Vec<&'a str> {
        self.options
            .iter()
            .filter(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .collect()
    }

    pub fn has_switch(&self, name: &str) -> bool {
        self.switches.contains(&name)
    }

    pub fn reject_unknown_switches(&self, known: &[&str]) -> Result<(), CommandError> {
        match self.switches.iter().find(|switch| !known.contains(switch)) {
            Some(switch) => Err(CommandError::InvalidArguments(format!(
                "unknown option `--{switch}`"
            ))),
            None => Ok(()),
        }
    }
}

pub(crate) fn kind(input: &str) -> Result<TransactionKind, CommandError> {
    Ok(TransactionKind::from_str(input)?)
}

pub(crate) fn date(input: &str) -> Result<NaiveDate, CommandError> {
    Ok(parse_iso_date(input)?)
}

pub(crate) fn month(input: &str) -> Result<YearMonth, CommandError> {
    Ok(YearMonth::from_str(input)?)
}

pub(crate) fn decimal(input: &str) -> Result<Decimal, CommandError> {
    Decimal::from_str(input.trim())
        .map_err(|_| CommandError::InvalidArguments(format!("`{input}` is not a number")))
}

pub(crate) fn count(input: &str, what: &str) -> Result<usize, CommandError> {
    match input.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(CommandError::InvalidArguments(format!(
            "{what} must be a positive whole number, got `{input}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_positionals_options_and_switches() {
        let args = ["2", "--type", "expense", "--legacy", "--category", "Food", "--category", "Rent"];
        let parsed = ParsedArgs::parse(&args, &["type", "category"]).unwrap();
        assert_eq!(parsed.positional, vec!["2"]);
        assert_eq!(parsed.option("type"), Some("expense"));
        assert_eq!(parsed.all("category"), vec!["Food", "Rent"]);
        assert!(parsed.has_switch("legacy"));
        assert!(parsed.reject_unknown_switches(&["legacy"]).is_ok());
        assert!(parsed.reject_unknown_switches(&[]).is_err());
    }

    #[test]
    fn valued_option_without_value_is_an_error() {
        let err = ParsedArgs::parse(&["--from"], &["from"]).unwrap_err();
        assert!(err.to_string().contains("--from"));
    }

    #[test]
    fn counts_must_be_positive() {
        assert_eq!(count("3", "page").unwrap(), 3);
        assert!(count("0", "page").is_err());
        assert!(count("x", "page").is_err());
    }
}
