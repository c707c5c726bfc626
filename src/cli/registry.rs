use std::collections::HashMap;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Commands by name, remembering registration order for `help`.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering a name twice replaces the handler but keeps the original position.
    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn re_registering_keeps_order() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("list", "first", "list", noop));
        registry.register(CommandEntry::new("add", "add", "add", noop));
        registry.register(CommandEntry::new("list", "second", "list", noop));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["list", "add"]);
        assert_eq!(registry.get("list").map(|e| e.description), Some("second"));
        assert!(registry.handler("missing").is_none());
    }
}
