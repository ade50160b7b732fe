//! # Command Registry
//!
//! Holds every known command, resolves names and aliases to handlers, and lists the help
//! lines a sender may see. Built once at startup and read-only afterwards.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::errors::{CommandError, RegistryError};
use crate::domain::traits::CommandSender;
use crate::strings::messages;

pub const DEFAULT_PREFIX: &str = "!";

/// Static description of a command: canonical name, aliases, and one-line docs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub help: &'static str,
}

impl CommandDescriptor {
    /// Canonical name followed by aliases.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

/// Everything a handler gets when it runs.
pub struct CommandContext<'a> {
    /// The command token as typed, prefix removed.
    pub command: &'a str,
    /// Whitespace-separated tokens after the command token.
    pub args: &'a [&'a str],
    pub sender: &'a dyn CommandSender,
    pub registry: &'a CommandRegistry,
}

/// Trait for implementing commands.
///
/// A handler returns the text of its reply; the dispatcher sends it.
#[async_trait]
pub trait Command: Send + Sync {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<String, CommandError>;
}

pub struct RegisteredCommand {
    pub descriptor: CommandDescriptor,
    pub handler: Arc<dyn Command>,
}

/// Usage strings are stored without the prefix and rendered with it.
pub struct CommandRegistry {
    prefix: String,
    entries: Vec<RegisteredCommand>,
    index: HashMap<&'static str, usize>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Registers a command under its name and aliases.
    ///
    /// Fails without registering anything if any of those names is already taken,
    /// including a descriptor that repeats its own name among its aliases.
    pub fn register(
        &mut self,
        descriptor: CommandDescriptor,
        handler: Arc<dyn Command>,
    ) -> Result<(), RegistryError> {
        let mut claimed: Vec<&'static str> = Vec::new();
        for name in descriptor.names() {
            if self.index.contains_key(name) || claimed.contains(&name) {
                return Err(RegistryError::Conflict(name.to_string()));
            }
            claimed.push(name);
        }

        let slot = self.entries.len();
        for name in claimed {
            self.index.insert(name, slot);
        }
        tracing::debug!("Registered command '{}'", descriptor.name);
        self.entries.push(RegisteredCommand {
            descriptor,
            handler,
        });
        Ok(())
    }

    /// Exact, case-sensitive lookup by name or alias.
    pub fn resolve(&self, token: &str) -> Option<&RegisteredCommand> {
        self.index.get(token).map(|&slot| &self.entries[slot])
    }

    /// Help lines for every command the sender may see, in registration order.
    pub fn list_descriptions(&self, sender: &dyn CommandSender) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| sender.has_capability(entry.descriptor.name))
            .map(|entry| {
                messages::help_entry(&self.prefix, entry.descriptor.usage, entry.descriptor.help)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_helpers::RecordingSender;

    struct Echo;

    #[async_trait]
    impl Command for Echo {
        async fn execute(&self, ctx: &CommandContext<'_>) -> Result<String, CommandError> {
            Ok(ctx.args.join(" "))
        }
    }

    const ECHO: CommandDescriptor = CommandDescriptor {
        name: "echo",
        aliases: &["say"],
        usage: "echo <text>",
        help: "Repeat the text.",
    };

    const ADMIN: CommandDescriptor = CommandDescriptor {
        name: "admin",
        aliases: &[],
        usage: "admin",
        help: "Admin only.",
    };

    #[test]
    fn test_resolve_name_and_alias() {
        let mut registry = CommandRegistry::new();
        registry.register(ECHO, Arc::new(Echo)).unwrap();
        assert_eq!(registry.resolve("echo").unwrap().descriptor.name, "echo");
        assert_eq!(registry.resolve("say").unwrap().descriptor.name, "echo");
        assert!(registry.resolve("Echo").is_none());
        assert!(registry.resolve("missing").is_none());
    }

    #[test]
    fn test_conflicting_alias_rejected_atomically() {
        let mut registry = CommandRegistry::new();
        registry.register(ECHO, Arc::new(Echo)).unwrap();
        let clash = CommandDescriptor {
            name: "shout",
            aliases: &["say"],
            usage: "shout",
            help: "Loud.",
        };
        assert_eq!(
            registry.register(clash, Arc::new(Echo)),
            Err(RegistryError::Conflict("say".to_string()))
        );
        assert!(registry.resolve("shout").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_descriptions_use_configured_prefix() {
        let mut registry = CommandRegistry::with_prefix(".");
        registry.register(ECHO, Arc::new(Echo)).unwrap();
        let sender = RecordingSender::new("@alice:example.org");
        assert_eq!(
            registry.list_descriptions(&sender),
            vec!["`.echo <text>` - Repeat the text."]
        );
    }

    #[test]
    fn test_alias_repeating_own_name_rejected() {
        let mut registry = CommandRegistry::new();
        let selfish = CommandDescriptor {
            name: "loop",
            aliases: &["loop"],
            usage: "loop",
            help: "Loops.",
        };
        assert!(registry.register(selfish, Arc::new(Echo)).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_descriptions_filtered_by_capability_in_order() {
        let mut registry = CommandRegistry::new();
        registry.register(ADMIN, Arc::new(Echo)).unwrap();
        registry.register(ECHO, Arc::new(Echo)).unwrap();

        let everyone = RecordingSender::new("@alice:example.org");
        assert_eq!(
            registry.list_descriptions(&everyone),
            vec!["`!admin` - Admin only.", "`!echo <text>` - Repeat the text."]
        );

        let restricted = RecordingSender::new("@bob:example.org").deny("admin");
        assert_eq!(
            registry.list_descriptions(&restricted),
            vec!["`!echo <text>` - Repeat the text."]
        );
    }
}
