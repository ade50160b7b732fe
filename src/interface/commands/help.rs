//! # Help Command
//!
//! Handles `help [page]`: the commands the sender may use, ten per page.

use async_trait::async_trait;

use crate::application::pagination::{self, PAGE_SIZE};
use crate::application::registry::{Command, CommandContext, CommandDescriptor};
use crate::domain::errors::CommandError;
use crate::strings::messages;

pub const DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: "help",
    aliases: &["commands"],
    usage: "help [page]",
    help: "View the help messages on [page].",
};

pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<String, CommandError> {
        let requested = pagination::requested_page(ctx.args.first().copied())?;
        let entries = ctx.registry.list_descriptions(ctx.sender);
        let page = pagination::paginate(&entries, requested, PAGE_SIZE)?;

        let mut out = messages::help_header(page.number, page.total);
        out.push_str("\n\n");
        for entry in page.items {
            out.push_str("* ");
            out.push_str(entry);
            out.push('\n');
        }
        if page.has_next() {
            out.push('\n');
            out.push_str(&messages::help_next_page(
                ctx.registry.prefix(),
                page.number + 1,
            ));
            out.push('\n');
        }
        Ok(out)
    }
}
