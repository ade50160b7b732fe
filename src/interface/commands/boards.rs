//! # Boards Command
//!
//! Handles `boards`: names every board the configured credentials can see.

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::fetcher::BoardSnapshotFetcher;
use crate::application::registry::{Command, CommandContext, CommandDescriptor};
use crate::domain::errors::CommandError;
use crate::strings::messages;

pub const DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: "boards",
    aliases: &["listBoards"],
    usage: "boards",
    help: "List the boards the bot can see.",
};

pub struct BoardsCommand {
    fetcher: Arc<BoardSnapshotFetcher>,
}

impl BoardsCommand {
    pub fn new(fetcher: Arc<BoardSnapshotFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Command for BoardsCommand {
    async fn execute(&self, _ctx: &CommandContext<'_>) -> Result<String, CommandError> {
        let names = self.fetcher.board_names().await?;
        if names.is_empty() {
            return Ok(messages::NO_BOARDS.to_string());
        }
        let mut out = messages::board_listing_header(names.len());
        for name in names {
            out.push_str("\n- ");
            out.push_str(&messages::escape_markdown(&name));
        }
        Ok(out)
    }
}
