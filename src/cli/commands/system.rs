use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        help::print_overview(&context.registry);
        return Ok(());
    };
    match context.command(&name.to_lowercase()) {
        Some(entry) => help::print_command(entry),
        None => context.suggest_command(name),
    }
    Ok(())
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    io::print_info(build_info::current().summary());
    io::print_info(format!("data directory: {}", context.base_dir.display()));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
