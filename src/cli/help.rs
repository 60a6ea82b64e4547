use crate::cli::output::{self, Align, Table};
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    let mut table = Table::new(&[("Command", Align::Left), ("Description", Align::Left)]);
    for entry in registry.entries() {
        table.add_row(vec![entry.name, entry.description]);
    }
    output::render_table(&table);
    output::hint("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::info(format!("description: {}", entry.description));
    output::info(format!("usage:       {}", entry.usage));
}
