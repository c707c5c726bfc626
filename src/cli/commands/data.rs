//! CSV export and import.

use std::path::PathBuf;

use crate::cli::commands::args::{self, ParsedArgs};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::analytics::monthly_bucket;
use crate::core::services::{CsvQuoting, ExportService};
use crate::domain::Transaction;
use crate::utils::paths::exports_dir_in;

const EXPORT_USAGE: &str =
    "export [path] [--month YYYY-MM] [--type income|expense] [--legacy|--standard]";
const IMPORT_USAGE: &str = "import <path>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write transactions to CSV (Type,Category,Amount,Date,Currency)",
            EXPORT_USAGE,
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Append transactions from a CSV file",
            IMPORT_USAGE,
            cmd_import,
        ),
    ]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["month", "type"])?;
    parsed.reject_unknown_switches(&["legacy", "standard"])?;
    let quoting = match (parsed.has_switch("legacy"), parsed.has_switch("standard")) {
        (true, true) => {
            return Err(CommandError::InvalidArguments(
                "choose either --legacy or --standard".into(),
            ))
        }
        (true, false) => CsvQuoting::Legacy,
        (false, true) => CsvQuoting::Standard,
        (false, false) => context.config.csv_quoting,
    };
    let path = match parsed.positional.as_slice() {
        [] => ExportService::default_export_path(&exports_dir_in(&context.base_dir)),
        [path] => PathBuf::from(path),
        _ => return Err(CommandError::InvalidArguments(format!("usage: {EXPORT_USAGE}"))),
    };

    let mut selected: Vec<&Transaction> = match parsed.option("month") {
        Some(month) => {
            let reference = args::month(month)?.first_day().ok_or_else(|| {
                CommandError::InvalidArguments(format!("month {month} is out of range"))
            })?;
            monthly_bucket(context.ledger.transactions(), reference)
        }
        None => context.ledger.transactions().iter().collect(),
    };
    if let Some(kind) = parsed.option("type") {
        let kind = args::kind(kind)?;
        selected.retain(|txn| txn.kind == kind);
    }

    let written = ExportService::write_csv(&selected, &path, quoting)?;
    io::print_success(format!(
        "Exported {written} transactions to {} ({quoting} CSV)",
        path.display()
    ));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(CommandError::InvalidArguments(format!("usage: {IMPORT_USAGE}")));
    };
    let report = ExportService::read_csv(&PathBuf::from(path))?;
    for rejected in &report.rejected {
        io::print_warning(format!("line {}: {}", rejected.line, rejected.error));
    }
    let outcome = ExportService::import_into(&mut context.ledger, &report, context.clock.as_ref());
    for (index, rule) in &outcome.invalid {
        let row = &report.rows[*index];
        io::print_warning(format!(
            "{} {} {} on {}: {rule}",
            row.kind, row.category, row.amount, row.date
        ));
    }
    io::print_success(format!(
        "Imported {} of {} rows",
        outcome.appended.len(),
        report.rows.len() + report.rejected.len()
    ));
    Ok(())
}
