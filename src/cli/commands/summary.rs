//! Monthly dashboard and category usage.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::cli::commands::args::{self, ParsedArgs};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::analytics::{CategoryTotal, MonthlyOverview, YearMonth};
use crate::core::services::{BudgetService, CategoryService, SummaryService};
use crate::domain::TransactionKind;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Monthly totals, daily series and category breakdown",
            "summary [YYYY-MM]",
            cmd_summary,
        ),
        CommandEntry::new(
            "categories",
            "Most used categories and suggestions",
            "categories [income|expense] [--limit N]",
            cmd_categories,
        ),
    ]
}

/// Reference day for an optional `YYYY-MM` argument; today when absent.
pub(crate) fn reference_day(
    context: &ShellContext,
    month: Option<&str>,
) -> Result<NaiveDate, CommandError> {
    let Some(month) = month else {
        return Ok(context.today());
    };
    let month = args::month(month)?;
    month
        .first_day()
        .ok_or_else(|| CommandError::InvalidArguments(format!("month {month} is out of range")))
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 1 {
        return Err(CommandError::InvalidArguments("usage: summary [YYYY-MM]".into()));
    }
    let reference = reference_day(context, args.first().copied())?;
    let overview =
        SummaryService::overview_cached(&mut context.cache, &context.ledger, reference).clone();

    let period = overview.period();
    if overview.is_empty() {
        io::print_info(format!("No transactions in {period}."));
        return Ok(());
    }
    print_totals(context, &overview, period);
    print_daily(context, &overview);
    print_breakdown(
        context,
        "Expenses by category",
        &overview.expense_by_category,
        overview.totals.expense,
    );
    print_breakdown(
        context,
        "Income by category",
        &overview.income_by_category,
        overview.totals.income,
    );
    print_budgets(context, reference);
    Ok(())
}

fn print_totals(context: &ShellContext, overview: &MonthlyOverview, period: YearMonth) {
    output::section(format!("Summary {period}"));
    let mut table = Table::new(vec![TableColumn::left("Total"), TableColumn::right("Amount")]);
    table.push_row(vec!["Income".into(), context.format_amount(overview.totals.income)]);
    table.push_row(vec!["Expenses".into(), context.format_amount(overview.totals.expense)]);
    table.push_row(vec!["Net".into(), context.format_amount(overview.totals.net)]);
    io::print_info(table.render());
    io::print_info(format!("{} transactions", overview.entry_count));
}

fn print_daily(context: &ShellContext, overview: &MonthlyOverview) {
    output::section("Daily");
    let mut table = Table::new(vec![
        TableColumn::left("Day"),
        TableColumn::right("Income"),
        TableColumn::right("Expense"),
        TableColumn::right("Net"),
    ]);
    for point in &overview.daily {
        table.push_row(vec![
            point.day.to_string(),
            context.format_amount(point.income_total),
            context.format_amount(point.expense_total),
            context.format_amount(point.net()),
        ]);
    }
    io::print_info(table.render());
}

fn print_breakdown(context: &ShellContext, title: &str, totals: &[CategoryTotal], whole: Decimal) {
    if totals.is_empty() {
        return;
    }
    output::section(title);
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Total"),
        TableColumn::right("Share"),
    ]);
    for total in totals {
        table.push_row(vec![
            total.category.clone(),
            context.format_amount(total.total),
            share(total.total, whole),
        ]);
    }
    io::print_info(table.render());
}

fn print_budgets(context: &ShellContext, reference: NaiveDate) {
    let statuses = BudgetService::statuses(&context.ledger, reference);
    if statuses.is_empty() {
        return;
    }
    output::section("Budgets");
    io::print_info(super::budget::status_table(context, &statuses).render());
}

fn share(part: Decimal, whole: Decimal) -> String {
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .map(|ratio| format!("{}%", ratio.round_dp(1)))
        .unwrap_or_else(|| "-".into())
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["limit"])?;
    parsed.reject_unknown_switches(&[])?;
    let kinds: Vec<TransactionKind> = match parsed.positional.as_slice() {
        [] => TransactionKind::ALL.to_vec(),
        [kind] => vec![args::kind(kind)?],
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: categories [income|expense] [--limit N]".into(),
            ))
        }
    };
    let limit = parsed
        .option("limit")
        .map(|limit| args::count(limit, "limit"))
        .transpose()?
        .unwrap_or(context.config.top_categories);

    for kind in kinds {
        output::section(format!("{kind} categories"));
        let usage = CategoryService::usage(&context.ledger, kind);
        if usage.is_empty() {
            io::print_info("Not used yet.");
        } else {
            let mut table = Table::new(vec![
                TableColumn::right("#"),
                TableColumn::left("Category"),
                TableColumn::right("Uses"),
            ]);
            for (rank, entry) in usage.iter().take(limit).enumerate() {
                table.push_row(vec![
                    (rank + 1).to_string(),
                    entry.category.clone(),
                    entry.count.to_string(),
                ]);
            }
            io::print_info(table.render());
        }
        let suggested = CategoryService::suggestions(&context.ledger, kind, limit);
        io::print_hint(format!("suggested: {}", suggested.join(", ")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::script_context;
    use rust_decimal_macros::dec;

    #[test]
    fn share_rounds_to_one_decimal() {
        assert_eq!(share(dec!(500), dec!(3850)), "13.0%");
        assert_eq!(share(dec!(1500), dec!(3850)), "39.0%");
        assert_eq!(share(dec!(1), Decimal::ZERO), "-");
        assert_eq!(share(Decimal::MAX, Decimal::MAX), "-");
    }

    #[test]
    fn summary_fills_the_cache_once_per_month() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = script_context(dir.path(), NaiveDate::from_ymd_opt(2024, 8, 20).unwrap());
        cmd_summary(&mut ctx, &[]).unwrap();
        cmd_summary(&mut ctx, &["2024-07"]).unwrap();
        cmd_summary(&mut ctx, &["2024-07"]).unwrap();
        assert_eq!(ctx.cache.len(), 2);
        assert_eq!(ctx.cache.stats(), (1, 2));
    }

    #[test]
    fn summary_rejects_bad_months() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = script_context(dir.path(), NaiveDate::from_ymd_opt(2024, 8, 20).unwrap());
        let err = cmd_summary(&mut ctx, &["2024-13"]).unwrap_err();
        assert!(err.to_string().contains("invalid month"));
    }

    #[test]
    fn categories_accepts_kind_and_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = script_context(dir.path(), NaiveDate::from_ymd_opt(2024, 8, 20).unwrap());
        assert!(cmd_categories(&mut ctx, &["expense", "--limit", "3"]).is_ok());
        assert!(cmd_categories(&mut ctx, &["transfer"]).is_err());
    }
}
