use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::table::{Table, TableColumn};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Commands");
    let mut table = Table::new(vec![TableColumn::left("Command"), TableColumn::left("Description")]);
    for entry in registry.list() {
        table.push_row(vec![entry.name.to_string(), entry.description.to_string()]);
    }
    io::print_info(table.render());
    io::print_hint("`help <command>` shows usage; press `?` or Tab to complete names.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("help: {}", entry.name));
    io::print_info(entry.description);
    io::print_info(format!("usage: {}", entry.usage));
}
