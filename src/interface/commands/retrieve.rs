//! # Card Retrieval Commands
//!
//! Handles `getAll @@<board>` (every card on a board) and `getList @@<board> @@<list>`
//! (the cards of one list). Names may contain spaces; arguments are re-joined with single
//! spaces before the `@@` markers are interpreted.

use async_trait::async_trait;
use std::sync::Arc;

use super::NAME_MARKER;
use crate::application::fetcher::BoardSnapshotFetcher;
use crate::application::registry::{Command, CommandContext, CommandDescriptor};
use crate::domain::errors::CommandError;
use crate::domain::types::BacklogItem;
use crate::strings::messages;

pub const GET_ALL: CommandDescriptor = CommandDescriptor {
    name: "getAll",
    aliases: &["retrieveAll"],
    usage: "getAll @@<board_name>",
    help: "Return all cards in the given board.",
};

pub const GET_LIST: CommandDescriptor = CommandDescriptor {
    name: "getList",
    aliases: &[],
    usage: "getList @@<board_name> @@<list_name>",
    help: "Return the cards of one list in the given board.",
};

/// Joins the arguments with single spaces and removes every `@@` marker.
pub fn board_name(args: &[&str]) -> Option<String> {
    let name = args.join(" ").replace(NAME_MARKER, "");
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Splits `@@board @@list` into its two names.
pub fn board_and_list(args: &[&str]) -> Option<(String, String)> {
    let joined = args.join(" ");
    let parts: Vec<&str> = joined
        .split(NAME_MARKER)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [board, list] => Some((board.to_string(), list.to_string())),
        _ => None,
    }
}

fn render(items: &[BacklogItem]) -> String {
    items
        .iter()
        .map(BacklogItem::summary_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct GetAllCommand {
    fetcher: Arc<BoardSnapshotFetcher>,
}

impl GetAllCommand {
    pub fn new(fetcher: Arc<BoardSnapshotFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Command for GetAllCommand {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<String, CommandError> {
        let board = board_name(ctx.args)
            .ok_or_else(|| CommandError::Validation(messages::BOARD_NAME_REQUIRED.to_string()))?;
        let items = self.fetcher.fetch_board(&board).await?;
        if items.is_empty() {
            return Ok(messages::board_empty(&board));
        }
        Ok(render(&items))
    }
}

pub struct GetListCommand {
    fetcher: Arc<BoardSnapshotFetcher>,
}

impl GetListCommand {
    pub fn new(fetcher: Arc<BoardSnapshotFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Command for GetListCommand {
    async fn execute(&self, ctx: &CommandContext<'_>) -> Result<String, CommandError> {
        let (board, list) = board_and_list(ctx.args).ok_or_else(|| {
            CommandError::Validation(messages::BOARD_AND_LIST_REQUIRED.to_string())
        })?;
        let items = self.fetcher.fetch_list(&board, &list).await?;
        if items.is_empty() {
            return Ok(messages::list_empty(&board, &list));
        }
        Ok(render(&items))
    }
}
