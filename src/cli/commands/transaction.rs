//! `add`, `list` and `search`.

use chrono::NaiveDate;

use crate::cli::commands::args::{self, ParsedArgs};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::analytics::YearMonth;
use crate::core::filters::{DateRange, FilterOptions};
use crate::core::pagination::Page;
use crate::core::services::{BudgetService, CategoryService, TransactionService};
use crate::currency::format_amount;
use crate::domain::{DateChoice, Transaction, TransactionDraft, TransactionKind};

const ADD_USAGE: &str =
    "add <income|expense> <category> <amount> [YYYY-MM-DD|today] [--currency CODE] [--note TEXT] [--tag TAG]...";
const LIST_USAGE: &str = "list [page] [--type income|expense] [--month YYYY-MM] [--from YYYY-MM-DD] [--to YYYY-MM-DD] [--min AMOUNT] [--max AMOUNT] [--category NAME]...";
const SEARCH_USAGE: &str = "search <text> [--page N]";

const LIST_OPTIONS: &[&str] = &["type", "month", "from", "to", "min", "max", "category"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new("list", "List transactions page by page", LIST_USAGE, cmd_list),
        CommandEntry::new(
            "search",
            "Find transactions by category, type, amount or date text",
            SEARCH_USAGE,
            cmd_search,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["currency", "note", "tag"])?;
    parsed.reject_unknown_switches(&[])?;

    let draft = if parsed.positional.is_empty() && context.is_interactive() {
        prompt_draft(context)?
    } else {
        draft_from_args(&parsed)?
    };

    let stored = TransactionService::add(&mut context.ledger, &draft, context.clock.as_ref())?;
    io::print_success(format!(
        "Recorded {} #{}: {} {} on {}",
        stored.kind,
        stored.id,
        stored.category,
        format_amount(stored.amount, &stored.currency),
        stored.date
    ));
    if stored.is_expense() && BudgetService::exceeds(&context.ledger, &stored) {
        if let Some(budget) = context.ledger.budget(stored.category.as_str()) {
            io::print_warning(format!(
                "{} is above the {} budget of {}",
                format_amount(stored.amount, &stored.currency),
                stored.category,
                context.format_amount(budget)
            ));
        }
    }
    Ok(())
}

fn draft_from_args(parsed: &ParsedArgs<'_>) -> Result<TransactionDraft, CommandError> {
    let (kind, category, amount, date) = match parsed.positional.as_slice() {
        [kind, category, amount] => (kind, category, amount, DateChoice::Today),
        [kind, category, amount, date] => (kind, category, amount, DateChoice::from_input(date)),
        _ => return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}"))),
    };
    let mut draft = TransactionDraft::new(args::kind(kind)?, *category, *amount, date)
        .with_tags(parsed.all("tag"));
    if let Some(currency) = parsed.option("currency") {
        draft = draft.with_currency(currency);
    }
    if let Some(note) = parsed.option("note") {
        draft = draft.with_description(note);
    }
    Ok(draft)
}

/// Interactive form: frequently used categories are offered first.
fn prompt_draft(context: &ShellContext) -> Result<TransactionDraft, CommandError> {
    let kinds: Vec<String> = TransactionKind::ALL
        .iter()
        .map(|kind| kind.as_str().to_string())
        .collect();
    let kind = TransactionKind::ALL[io::prompt_select(&context.theme, "Type", &kinds, 1)?];

    let mut categories =
        CategoryService::suggestions(&context.ledger, kind, context.config.top_categories);
    categories.push("Other…".to_string());
    let picked = io::prompt_select(&context.theme, "Category", &categories, 0)?;
    let category = if picked + 1 == categories.len() {
        io::prompt_text(&context.theme, "Category name", None)?
    } else {
        categories[picked].clone()
    };

    let amount = io::prompt_text(&context.theme, "Amount", None)?;
    let date = io::prompt_text(&context.theme, "Date (YYYY-MM-DD or today)", Some("today"))?;
    let currency = io::prompt_text(
        &context.theme,
        "Currency",
        Some(context.currency().as_str()),
    )?;
    let note = io::prompt_optional_text(&context.theme, "Note (optional)")?;

    let draft = TransactionDraft::new(kind, category, amount, DateChoice::from_input(&date))
        .with_currency(currency);
    Ok(match note {
        Some(note) => draft.with_description(note),
        None => draft,
    })
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, LIST_OPTIONS)?;
    parsed.reject_unknown_switches(&[])?;
    let page = match parsed.positional.as_slice() {
        [] => 1,
        [page] => args::count(page, "page")?,
        _ => return Err(CommandError::InvalidArguments(format!("usage: {LIST_USAGE}"))),
    };
    let options = filter_options(&parsed)?;
    let listing = TransactionService::page(
        &context.ledger,
        "",
        &options,
        page,
        context.config.page_size,
    )?;
    print_page(context, &listing);
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["page"])?;
    parsed.reject_unknown_switches(&[])?;
    let query = parsed.positional.join(" ");
    if query.trim().is_empty() {
        return Err(CommandError::InvalidArguments(format!("usage: {SEARCH_USAGE}")));
    }
    let page = parsed
        .option("page")
        .map(|page| args::count(page, "page"))
        .transpose()?
        .unwrap_or(1);
    let listing = TransactionService::page(
        &context.ledger,
        &query,
        &FilterOptions::new(),
        page,
        context.config.page_size,
    )?;
    print_page(context, &listing);
    Ok(())
}

fn filter_options(parsed: &ParsedArgs<'_>) -> Result<FilterOptions, CommandError> {
    let mut options = FilterOptions::new();
    if let Some(kind) = parsed.option("type") {
        options = options.kind(args::kind(kind)?);
    }
    if let Some(range) = date_range(parsed)? {
        options = options.between(range);
    }
    if let Some(min) = parsed.option("min") {
        options = options.min_amount(args::decimal(min)?);
    }
    if let Some(max) = parsed.option("max") {
        options = options.max_amount(args::decimal(max)?);
    }
    for category in parsed.all("category") {
        options = options.category(category);
    }
    Ok(options)
}

/// `--month` wins over `--from`/`--to`; an open end is unbounded.
fn date_range(parsed: &ParsedArgs<'_>) -> Result<Option<DateRange>, CommandError> {
    if let Some(month) = parsed.option("month") {
        return month_range(args::month(month)?).map(Some);
    }
    let from = parsed.option("from").map(args::date).transpose()?;
    let to = parsed.option("to").map(args::date).transpose()?;
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let range = DateRange::new(
        from.unwrap_or(NaiveDate::MIN),
        to.unwrap_or(NaiveDate::MAX),
    )?;
    Ok(Some(range))
}

pub(crate) fn month_range(month: YearMonth) -> Result<DateRange, CommandError> {
    let (next_year, next_month) = if month.month == 12 {
        (month.year + 1, 1)
    } else {
        (month.year, month.month + 1)
    };
    let start = month.first_day();
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|day| day.pred_opt());
    match (start, end) {
        (Some(start), Some(end)) => Ok(DateRange::new(start, end)?),
        _ => Err(CommandError::InvalidArguments(format!(
            "month {month} is out of range"
        ))),
    }
}

fn print_page(context: &ShellContext, listing: &Page<&Transaction>) {
    if listing.total_items == 0 {
        io::print_info("No transactions match.");
        return;
    }
    if listing.items.is_empty() {
        io::print_warning(format!(
            "Page {} is past the end; there are {} pages.",
            listing.page, listing.total_pages
        ));
        return;
    }
    io::print_info(transaction_table(context, &listing.items).render());
    io::print_info(format!(
        "Page {} of {} ({} transactions)",
        listing.page, listing.total_pages, listing.total_items
    ));
}

/// Rows flagged `over` are expenses larger than their category budget.
pub(crate) fn transaction_table(context: &ShellContext, transactions: &[&Transaction]) -> Table {
    let with_budgets = context.ledger.budgets().next().is_some();
    let mut columns = vec![
        TableColumn::right("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Type"),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::left("Note"),
    ];
    if with_budgets {
        columns.push(TableColumn::left("Budget"));
    }
    let mut table = Table::new(columns);
    for txn in transactions {
        let mut row = vec![
            txn.id.to_string(),
            txn.date.to_string(),
            txn.kind.to_string(),
            txn.category.to_string(),
            format_amount(txn.amount, &txn.currency),
            txn.description.clone().unwrap_or_default(),
        ];
        if with_budgets {
            let flag = if txn.is_expense() && BudgetService::exceeds(&context.ledger, txn) {
                "over"
            } else {
                ""
            };
            row.push(flag.to_string());
        }
        table.push_row(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::script_context;
    use rust_decimal_macros::dec;

    fn context(dir: &tempfile::TempDir) -> ShellContext {
        script_context(dir.path(), NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
    }

    #[test]
    fn add_parses_options_and_defaults_to_today() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        cmd_add(
            &mut ctx,
            &["expense", "Food", "12.5", "--note", "lunch", "--tag", "work", "--currency", "eur"],
        )
        .unwrap();
        let stored = ctx.ledger.transactions().last().unwrap();
        assert_eq!(stored.id, 25);
        assert_eq!(stored.amount, dec!(12.5));
        assert_eq!(stored.date, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
        assert_eq!(stored.currency.as_str(), "EUR");
        assert_eq!(stored.description.as_deref(), Some("lunch"));
        assert_eq!(stored.tags, vec!["work"]);
    }

    #[test]
    fn add_rejects_future_expense() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        let err = cmd_add(&mut ctx, &["expense", "Food", "10", "2024-07-20"]).unwrap_err();
        assert!(err.to_string().contains("future"));
        assert_eq!(ctx.ledger.len(), 24);
    }

    #[test]
    fn add_without_arguments_in_script_mode_shows_usage() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        let err = cmd_add(&mut ctx, &[]).unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(ref m) if m.starts_with("usage:")));
    }

    #[test]
    fn month_range_covers_whole_month() {
        let range = month_range("2024-12".parse().unwrap()).unwrap();
        assert!(range.contains(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        let feb = month_range("2024-02".parse().unwrap()).unwrap();
        assert!(feb.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
    }

    #[test]
    fn list_filters_combine() {
        let parsed = ParsedArgs::parse(
            &["--type", "expense", "--month", "2024-08", "--min", "500"],
            LIST_OPTIONS,
        )
        .unwrap();
        let options = filter_options(&parsed).unwrap();
        let ledger = crate::ledger::Ledger::with_seed_data();
        let ids: Vec<u64> = options
            .apply(ledger.transactions())
            .iter()
            .map(|txn| txn.id)
            .collect();
        assert_eq!(ids, vec![14, 15, 24]);
    }

    #[test]
    fn list_rejects_bad_page_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        assert!(cmd_list(&mut ctx, &["0"]).is_err());
        assert!(cmd_list(&mut ctx, &["2"]).is_ok());
    }
}
