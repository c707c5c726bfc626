use std::mem;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::config::Config;
use crate::core::services::CsvQuoting;

const USAGE: &str = "config show | config set <key> <value>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change saved preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show(context);
            Ok(())
        }
        ["set", key, value] => set(context, key, value),
        _ => Err(CommandError::InvalidArguments(format!("usage: {USAGE}"))),
    }
}

fn show(context: &ShellContext) {
    output::section("Config");
    let mut table = Table::new(vec![TableColumn::left("Key"), TableColumn::left("Value")]);
    for (key, value) in entries(&context.config) {
        table.push_row(vec![key.to_string(), value]);
    }
    io::print_info(table.render());
    io::print_hint(format!("stored at {}", context.config_manager.config_path().display()));
}

fn entries(config: &Config) -> Vec<(&'static str, String)> {
    vec![
        ("currency", config.currency.clone()),
        ("page_size", config.page_size.to_string()),
        ("top_categories", config.top_categories.to_string()),
        ("csv_quoting", config.csv_quoting.to_string()),
        ("seed_demo_data", config.seed_demo_data.to_string()),
        ("ui_color_enabled", config.ui_color_enabled.to_string()),
    ]
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    apply(&mut updated, key, value)?;
    let currency = updated.currency_code()?;
    context.config_manager.save(&updated)?;

    context.config = updated;
    context.ledger = mem::take(&mut context.ledger).with_default_currency(currency);
    context.apply_output_preferences();
    io::print_success(format!("{key} = {value}"));
    if key == "seed_demo_data" {
        io::print_hint("takes effect next session");
    }
    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<(), CommandError> {
    match key {
        "currency" => config.currency = value.trim().to_ascii_uppercase(),
        "page_size" => config.page_size = parse_number(key, value)?,
        "top_categories" => config.top_categories = parse_number(key, value)?,
        "csv_quoting" => config.csv_quoting = value.parse::<CsvQuoting>()?,
        "seed_demo_data" => config.seed_demo_data = parse_flag(key, value)?,
        "ui_color_enabled" => config.ui_color_enabled = parse_flag(key, value)?,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{other}`"
            )))
        }
    }
    Ok(())
}

fn parse_number(key: &str, value: &str) -> Result<usize, CommandError> {
    value
        .trim()
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("{key} expects a number")))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, CommandError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => Err(CommandError::InvalidArguments(format!(
            "{key} expects true or false"
        ))),
    }
}
