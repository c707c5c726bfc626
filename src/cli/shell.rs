use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext, SCRIPT_ENV};
use crate::cli::output;

/// Runs the shell, reading commands from stdin when `EXPENSE_CORE_CLI_SCRIPT` is set.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context, io::stdin().lock()),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::info("Expense tracker shell. Type `help` to list commands.");
    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match context.process_line(trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// One command per line; blank lines and `#` comments are skipped.
pub(crate) fn run_script<R: BufRead>(context: &mut ShellContext, input: R) -> Result<(), CliError> {
    for line in input.lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match context.process_line(&line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

/// Completes command names for the first word on the line.
struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_ascii_lowercase).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn candidates(&self, prefix: &str) -> Vec<Pair> {
        let needle = prefix.to_ascii_lowercase();
        self.commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        let start = before.len() - before.trim_start().len();
        let word = &before[start..];
        if word.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        Ok((start, self.candidates(word)))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::script_context;
    use chrono::NaiveDate;

    #[test]
    fn completion_only_applies_to_the_command_word() {
        let helper = CommandHelper::new(vec!["summary", "search", "list"]);
        let names: Vec<String> = helper.candidates("s").into_iter().map(|p| p.display).collect();
        assert_eq!(names, vec!["search", "summary"]);
        assert!(helper.candidates("x").is_empty());
    }

    #[test]
    fn script_stops_at_exit_and_survives_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = script_context(dir.path(), NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
        let script = "add expense Food -5\nadd expense Food 12.50 2024-07-14\nexit\nadd income Salary 10\n";
        run_script(&mut ctx, script.as_bytes()).unwrap();
        assert_eq!(ctx.ledger.len(), 25);
        assert!(!ctx.running);
    }
}
