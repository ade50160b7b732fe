//! # Command Dispatcher
//!
//! Tokenizes an incoming message, resolves the command through the registry and runs it.
//! Every dispatch sends exactly one reply; no handler failure escapes this boundary.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;

use crate::application::registry::{CommandContext, CommandRegistry};
use crate::domain::traits::CommandSender;
use crate::strings::{logs, messages};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Replied,
    UnknownCommand,
    Denied,
    Failed,
}

/// Uses the registry's prefix to recognise command tokens.
pub struct CommandDispatcher {
    registry: CommandRegistry,
}

impl CommandDispatcher {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn prefix(&self) -> &str {
        self.registry.prefix()
    }

    /// Whether a chat message is addressed to the bot at all.
    pub fn is_command(&self, message: &str) -> bool {
        message.trim_start().starts_with(self.prefix())
    }

    pub async fn dispatch(&self, raw: &str, sender: &dyn CommandSender) -> DispatchOutcome {
        let mut tokens = raw.split_whitespace();
        let token = tokens.next().unwrap_or_default();
        let args: Vec<&str> = tokens.collect();
        let command = token.strip_prefix(self.prefix()).unwrap_or(token);

        tracing::info!(
            "Dispatching cmd='{}' args='{}' sender='{}'",
            command,
            args.join(" "),
            sender.id()
        );

        let Some(entry) = self.registry.resolve(command) else {
            self.reply(sender, messages::UNKNOWN_COMMAND).await;
            return DispatchOutcome::UnknownCommand;
        };

        if !sender.has_capability(entry.descriptor.name) {
            tracing::warn!(
                "Sender '{}' lacks capability for '{}'",
                sender.id(),
                entry.descriptor.name
            );
            self.reply(sender, messages::AUTH_DENIED).await;
            return DispatchOutcome::Denied;
        }

        let ctx = CommandContext {
            command,
            args: &args,
            sender,
            registry: &self.registry,
        };

        match AssertUnwindSafe(entry.handler.execute(&ctx))
            .catch_unwind()
            .await
        {
            Ok(Ok(reply)) => {
                self.reply(sender, &reply).await;
                DispatchOutcome::Replied
            }
            Ok(Err(err)) => {
                tracing::warn!("Command '{}' failed: {}", entry.descriptor.name, err);
                self.reply(sender, &messages::command_error(&err)).await;
                DispatchOutcome::Failed
            }
            Err(_) => {
                tracing::error!("Command '{}' panicked", entry.descriptor.name);
                self.reply(sender, messages::COMMAND_CRASHED).await;
                DispatchOutcome::Failed
            }
        }
    }

    async fn reply(&self, sender: &dyn CommandSender, content: &str) {
        if let Err(e) = sender.send_message(content).await {
            tracing::error!("{}", logs::reply_failed(sender.id(), &e));
        }
    }
}
