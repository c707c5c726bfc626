use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputPreferences {
    pub color: bool,
    /// ASCII-only decorations, used for script mode so output diffs cleanly.
    pub plain: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            color: true,
            plain: false,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    colored::control::set_override(prefs.color);
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn prefix(kind: MessageKind, prefs: &OutputPreferences) -> &'static str {
    match (kind, prefs.plain) {
        (MessageKind::Success, false) => "✓ ",
        (MessageKind::Success, true) => "ok: ",
        (MessageKind::Warning, _) => "warning: ",
        (MessageKind::Error, _) => "error: ",
        (MessageKind::Hint, _) => "hint: ",
        (MessageKind::Info | MessageKind::Section, _) => "",
    }
}

pub(crate) fn style(kind: MessageKind, message: impl fmt::Display) -> String {
    let prefs = current_preferences();
    let text = message.to_string();
    let line = match kind {
        MessageKind::Section => format!("== {} ==", text.trim()),
        _ => format!("{}{}", prefix(kind, &prefs), text),
    };
    match kind {
        MessageKind::Success => line.bright_green().to_string(),
        MessageKind::Warning => line.bright_yellow().to_string(),
        MessageKind::Error => line.bright_red().to_string(),
        MessageKind::Hint => line.dimmed().to_string(),
        MessageKind::Section => line.bold().to_string(),
        MessageKind::Info => line,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let styled = style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{styled}"),
        _ => println!("{styled}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}
