//! Line-oriented shell over an in-memory ledger.
//!
//! Runs interactively through `rustyline`, or reads commands from stdin when
//! `EXPENSE_CORE_CLI_SCRIPT` is set.

pub mod commands;
pub mod core;
mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod table;

pub use shell::run_cli;
