//! CSV export and import of transaction lists.
//!
//! Exports always use the column order `Type,Category,Amount,Date,Currency`.
//! Imports read the same header back into [`RawTransaction`] rows; a row whose
//! type, amount or date cannot be read is left out and reported, never fatal.

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::clock::Clock;
use crate::core::errors::{ExpenseError, ParseError, ValidationError};
use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{parse_iso_date, LedgerEntry, RawTransaction, TransactionKind};
use crate::ledger::Ledger;
use crate::utils::paths::ensure_dir;

pub const CSV_HEADER: [&str; 5] = ["Type", "Category", "Amount", "Date", "Currency"];
pub const DEFAULT_EXPORT_FILE: &str = "transactions.csv";

/// How field values are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvQuoting {
    /// Fields joined with commas as-is, rows joined with `\n`, no trailing newline.
    Legacy,
    /// RFC 4180 quoting; every row ends with `\n`.
    #[default]
    Standard,
}

impl fmt::Display for CsvQuoting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Legacy => "legacy",
            Self::Standard => "standard",
        })
    }
}

impl FromStr for CsvQuoting {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "standard" => Ok(Self::Standard),
            other => Err(ExpenseError::InvalidInput(format!(
                "unknown CSV quoting `{other}` (expected legacy or standard)"
            ))),
        }
    }
}

/// A CSV row left out of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub line: u64,
    pub error: ParseError,
}

/// Rows read from a CSV file, split into readable and rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub rows: Vec<RawTransaction>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Result of appending an [`ImportReport`] to a ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub appended: Vec<u64>,
    /// Readable rows that still failed draft validation, keyed by row index.
    pub invalid: Vec<(usize, ValidationError)>,
}

pub struct ExportService;

impl ExportService {
    pub fn to_csv<E: LedgerEntry>(entries: &[E], quoting: CsvQuoting) -> ServiceResult<String> {
        match quoting {
            CsvQuoting::Legacy => Ok(Self::legacy_csv(entries)),
            CsvQuoting::Standard => Self::standard_csv(entries),
        }
    }

    /// Writes `entries` to `path`, creating parent directories. Returns the row count.
    pub fn write_csv<E: LedgerEntry>(
        entries: &[E],
        path: &Path,
        quoting: CsvQuoting,
    ) -> ServiceResult<usize> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir(parent).map_err(ExpenseError::from)?;
            }
        }
        let body = Self::to_csv(entries, quoting)?;
        fs::write(path, body).map_err(ExpenseError::from)?;
        info!(path = %path.display(), rows = entries.len(), %quoting, "Exported transactions");
        Ok(entries.len())
    }

    pub fn default_export_path(exports_dir: &Path) -> PathBuf {
        exports_dir.join(DEFAULT_EXPORT_FILE)
    }

    pub fn read_csv(path: &Path) -> ServiceResult<ImportReport> {
        let file = fs::File::open(path).map_err(ExpenseError::from)?;
        let report = Self::parse_csv(file)?;
        info!(
            path = %path.display(),
            rows = report.rows.len(),
            rejected = report.rejected.len(),
            "Read CSV import"
        );
        Ok(report)
    }

    pub fn parse_csv<R: Read>(reader: R) -> ServiceResult<ImportReport> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(ExpenseError::from)?.clone();
        let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let required = |name: &str| {
            column(name).ok_or_else(|| {
                ServiceError::Invalid(format!("CSV header is missing the `{name}` column"))
            })
        };
        let kind_at = required("Type")?;
        let category_at = required("Category")?;
        let amount_at = required("Amount")?;
        let date_at = required("Date")?;
        let currency_at = column("Currency");

        let mut report = ImportReport::default();
        for record in csv_reader.records() {
            let record = record.map_err(ExpenseError::from)?;
            let line = record.position().map(|pos| pos.line()).unwrap_or(0);
            let field = |at: usize| record.get(at).unwrap_or("");

            let parsed = Self::parse_row(
                field(kind_at),
                field(category_at),
                field(amount_at),
                field(date_at),
                currency_at.map(field).unwrap_or(""),
            );
            match parsed {
                Ok(row) => report.rows.push(row),
                Err(error) => {
                    warn!(line, %error, "Skipping unreadable CSV row");
                    report.rejected.push(RejectedRow { line, error });
                }
            }
        }
        Ok(report)
    }

    /// Runs every readable row through draft validation and appends the valid ones.
    pub fn import_into(
        ledger: &mut Ledger,
        report: &ImportReport,
        clock: &dyn Clock,
    ) -> ImportOutcome {
        let today = clock.today();
        let mut outcome = ImportOutcome::default();
        for (index, row) in report.rows.iter().enumerate() {
            match ledger.append(&row.to_draft(), today) {
                Ok(txn) => outcome.appended.push(txn.id),
                Err(err) => outcome.invalid.push((index, err)),
            }
        }
        info!(
            appended = outcome.appended.len(),
            invalid = outcome.invalid.len(),
            "Imported CSV rows"
        );
        outcome
    }

    fn parse_row(
        kind: &str,
        category: &str,
        amount: &str,
        date: &str,
        currency: &str,
    ) -> Result<RawTransaction, ParseError> {
        let kind = TransactionKind::from_str(kind)?;
        let amount = Decimal::from_str(amount).map_err(|_| ParseError::InvalidAmount {
            input: amount.to_string(),
        })?;
        parse_iso_date(date)?;
        Ok(RawTransaction {
            kind,
            category: category.to_string(),
            amount,
            date: date.to_string(),
            currency: currency.to_string(),
        })
    }

    /// Legacy rows print amounts without trailing fractional zeros (`12.50` as `12.5`).
    fn row_fields<E: LedgerEntry>(entry: &E, quoting: CsvQuoting) -> [String; 5] {
        let amount = match quoting {
            CsvQuoting::Legacy => entry.amount().normalize(),
            CsvQuoting::Standard => entry.amount(),
        };
        [
            entry.kind().as_str().to_string(),
            entry.category().to_string(),
            amount.to_string(),
            entry.date_text(),
            entry.currency().to_string(),
        ]
    }

    fn legacy_csv<E: LedgerEntry>(entries: &[E]) -> String {
        std::iter::once(CSV_HEADER.join(","))
            .chain(entries.iter().map(|entry| Self::row_fields(entry, CsvQuoting::Legacy).join(",")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn standard_csv<E: LedgerEntry>(entries: &[E]) -> ServiceResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER).map_err(ExpenseError::from)?;
        for entry in entries {
            writer
                .write_record(Self::row_fields(entry, CsvQuoting::Standard))
                .map_err(ExpenseError::from)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| ExpenseError::StorageError(err.to_string()))?;
        String::from_utf8(bytes)
            .map_err(|err| ServiceError::Invalid(format!("CSV output is not UTF-8: {err}")))
    }
}
