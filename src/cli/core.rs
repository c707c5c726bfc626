//! Shell state, dispatch and error reporting.

use std::{env, io, path::PathBuf};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use rust_decimal::Decimal;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use tracing::{debug, info};

use crate::cli::commands;
use crate::cli::io as cli_io;
use crate::cli::output::{set_preferences, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::config::{Config, ConfigManager};
use crate::core::analytics::OverviewCache;
use crate::core::clock::{Clock, FixedClock, SystemClock};
use crate::core::errors::{ExpenseError, ParseError, ValidationError};
use crate::core::services::ServiceError;
use crate::currency::{format_amount, CurrencyCode};
use crate::domain::parse_iso_date;
use crate::ledger::Ledger;
use crate::utils::paths::app_data_dir;

pub use crate::core::errors::CliError;

pub const SCRIPT_ENV: &str = "EXPENSE_CORE_CLI_SCRIPT";
pub const TODAY_ENV: &str = "EXPENSE_CORE_TODAY";

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] ExpenseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(err) => CommandError::Core(err),
            ServiceError::Validation(err) => CommandError::Validation(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            CommandError::InvalidArguments(message) => CliError::Input(message),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Core(ExpenseError::from(err))
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Everything a command handler can reach.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: Ledger,
    pub cache: OverviewCache,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub base_dir: PathBuf,
    pub clock: Box<dyn Clock>,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Context rooted at `$EXPENSE_CORE_HOME` (or `~/.expense_core`).
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut context = Self::with_base_dir(mode, app_data_dir())?;
        if let Some(clock) = clock_from_env()? {
            context.clock = clock;
        }
        Ok(context)
    }

    pub fn with_base_dir(mode: CliMode, base_dir: PathBuf) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(&base_dir)?;
        let config = config_manager.load()?;
        let ledger = initial_ledger(&config)?;

        let context = Self {
            mode,
            registry,
            ledger,
            cache: OverviewCache::new(),
            config,
            config_manager,
            base_dir,
            clock: Box::new(SystemClock),
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        };
        context.apply_output_preferences();
        info!(
            mode = ?mode,
            base = %context.base_dir.display(),
            transactions = context.ledger.len(),
            "Shell ready"
        );
        Ok(context)
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn currency(&self) -> &CurrencyCode {
        self.ledger.default_currency()
    }

    pub fn format_amount(&self, amount: Decimal) -> String {
        format_amount(amount, self.currency())
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn prompt(&self) -> String {
        format!("expense_core [{} txns]> ", self.ledger.len())
    }

    /// Re-applies colour settings after the config changes.
    pub(crate) fn apply_output_preferences(&self) {
        let script = self.mode == CliMode::Script;
        set_preferences(OutputPreferences {
            color: self.config.ui_color_enabled && !script,
            plain: script,
        });
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(LoopControl::Continue);
        }
        let tokens = match shell_words::split(trimmed) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(format!("Could not parse input: {err}"));
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.last_command = Some(trimmed.to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        debug!(command, args = args.len(), "Dispatching command");
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                cli_io::print_hint(format!("Did you mean `{name}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    /// Prints a failed command's error; the shell keeps running afterwards.
    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Validation(rule) => {
                cli_io::print_error(format!("Transaction rejected: {rule}"));
            }
            other => cli_io::print_error(other),
        }
        Ok(())
    }

    pub(crate) fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }
}

fn initial_ledger(config: &Config) -> Result<Ledger, CliError> {
    let ledger = if config.seed_demo_data {
        Ledger::with_seed_data()
    } else {
        Ledger::new()
    };
    Ok(ledger.with_default_currency(config.currency_code()?))
}

/// A `FixedClock` when `EXPENSE_CORE_TODAY` holds a `YYYY-MM-DD` date.
fn clock_from_env() -> Result<Option<Box<dyn Clock>>, CliError> {
    let Some(raw) = env::var_os(TODAY_ENV) else {
        return Ok(None);
    };
    let text = raw.to_string_lossy();
    let today = parse_iso_date(&text).map_err(ExpenseError::from)?;
    Ok(Some(Box::new(FixedClock::new(today))))
}

#[cfg(test)]
pub(crate) fn script_context(base: &std::path::Path, today: NaiveDate) -> ShellContext {
    ShellContext::with_base_dir(CliMode::Script, base.to_path_buf())
        .expect("script context")
        .with_clock(FixedClock::new(today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(dir: &tempfile::TempDir) -> ShellContext {
        script_context(dir.path(), NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
    }

    #[test]
    fn new_context_starts_with_seed_data() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        assert_eq!(ctx.ledger.len(), 24);
        assert_eq!(ctx.prompt(), "expense_core [24 txns]> ");
        assert!(ctx.command_names().contains(&"summary"));
    }

    #[test]
    fn exit_stops_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        assert_eq!(ctx.process_line("exit").unwrap(), LoopControl::Exit);
        assert!(!ctx.running);
    }

    #[test]
    fn unknown_commands_and_comments_continue() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        assert_eq!(ctx.process_line("lsit").unwrap(), LoopControl::Continue);
        assert_eq!(ctx.process_line("# comment").unwrap(), LoopControl::Continue);
        assert_eq!(ctx.process_line("add \"unterminated").unwrap(), LoopControl::Continue);
        assert_eq!(ctx.ledger.len(), 24);
    }

    #[test]
    fn validation_errors_surface_as_command_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        let err = ctx
            .process_line("add expense Food 0")
            .expect_err("zero amount must be rejected");
        assert!(matches!(
            err,
            CommandError::Validation(ValidationError::NonPositiveAmount)
        ));
        assert_eq!(ctx.ledger.len(), 24);
    }

    #[test]
    fn service_errors_map_to_command_errors() {
        let invalid: CommandError = ServiceError::Invalid("bad".into()).into();
        assert!(matches!(invalid, CommandError::InvalidArguments(ref m) if m == "bad"));
        let cli: CliError = CommandError::InvalidArguments("oops".into()).into();
        assert!(matches!(cli, CliError::Input(_)));
    }
}
