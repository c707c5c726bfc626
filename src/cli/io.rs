use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::core::CommandError;
use crate::cli::output;

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Prompt for free-form text, pre-filled with `initial` when given.
pub fn prompt_text(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: Option<&str>,
) -> Result<String, CommandError> {
    let mut input = Input::<String>::with_theme(theme).with_prompt(prompt);
    if let Some(initial) = initial {
        input = input.with_initial_text(initial);
    }
    input.interact_text().map_err(CommandError::from)
}

/// Prompt for text the user may leave blank; a blank answer is `None`.
pub fn prompt_optional_text(
    theme: &ColorfulTheme,
    prompt: &str,
) -> Result<Option<String>, CommandError> {
    let answer = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(CommandError::from)?;
    Ok(optional_answer(answer))
}

fn optional_answer(answer: String) -> Option<String> {
    let trimmed = answer.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Prompt for one of `items`; returns the chosen index.
pub fn prompt_select(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[String],
    default: usize,
) -> Result<usize, CommandError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}
