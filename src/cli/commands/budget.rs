use crate::cli::commands::args;
use crate::cli::commands::summary::reference_day;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::analytics::YearMonth;
use crate::core::services::{BudgetService, CategoryBudgetStatus};

const USAGE: &str = "budget set <category> <amount> | budget show [YYYY-MM]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "budget",
        "Set category budgets or compare them with monthly spending",
        USAGE,
        cmd_budget,
    )]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["set", category, amount] => set_budget(context, category, amount),
        [] | ["show"] => show_budgets(context, None),
        ["show", month] => show_budgets(context, Some(*month)),
        _ => Err(CommandError::InvalidArguments(format!("usage: {USAGE}"))),
    }
}

fn set_budget(context: &mut ShellContext, category: &str, amount: &str) -> CommandResult {
    let amount = args::decimal(amount)?;
    BudgetService::set(&mut context.ledger, category, amount)?;
    io::print_success(format!(
        "Budget for {} set to {}",
        category.trim(),
        context.format_amount(amount)
    ));
    Ok(())
}

fn show_budgets(context: &mut ShellContext, month: Option<&str>) -> CommandResult {
    let reference = reference_day(context, month)?;
    let statuses = BudgetService::statuses(&context.ledger, reference);
    output::section(format!("Budgets {}", YearMonth::of(reference)));
    if statuses.is_empty() {
        io::print_info("No budgets set. Use `budget set <category> <amount>`.");
        return Ok(());
    }
    io::print_info(status_table(context, &statuses).render());
    Ok(())
}

pub(crate) fn status_table(context: &ShellContext, statuses: &[CategoryBudgetStatus]) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Budget"),
        TableColumn::right("Spent"),
        TableColumn::right("Remaining"),
        TableColumn::left("Status"),
    ]);
    for status in statuses {
        table.push_row(vec![
            status.category.clone(),
            context.format_amount(status.budget),
            context.format_amount(status.spent),
            context.format_amount(status.remaining),
            status.status.label().to_string(),
        ]);
    }
    table
}
