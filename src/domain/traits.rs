//! # Domain Traits
//!
//! Abstract interfaces for the collaborators the core talks to (chat room, command sender,
//! notification sink, tracking service). Implemented in the Infrastructure layer.

use async_trait::async_trait;

use crate::domain::errors::TrackerError;
use crate::domain::types::{BacklogItem, BoardRef, ListRef};

/// Abstract interface for a Chat Provider (e.g., Matrix, Slack, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the room, returning the event id
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a notification (not tracked)
    async fn send_notification(&self, content: &str) -> Result<(), String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// The user (and room) that issued a command. Replies go back through it.
#[async_trait]
pub trait CommandSender: Send + Sync {
    async fn send_message(&self, content: &str) -> Result<(), String>;

    /// Whether this sender may see and run the command with the given canonical name.
    fn has_capability(&self, command: &str) -> bool;

    fn id(&self) -> &str;
}

/// Destination for change announcements produced by the poller.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, content: &str) -> Result<(), String>;
}

/// Read-only access to the remote tracking service.
#[async_trait]
pub trait BoardService: Send + Sync {
    /// Every board visible to the configured credentials.
    async fn boards(&self) -> Result<Vec<BoardRef>, TrackerError>;

    /// All open cards of a board, whatever list they sit in.
    async fn board_cards(&self, board_id: &str) -> Result<Vec<BacklogItem>, TrackerError>;

    async fn board_lists(&self, board_id: &str) -> Result<Vec<ListRef>, TrackerError>;

    async fn list_cards(&self, list: &ListRef) -> Result<Vec<BacklogItem>, TrackerError>;

    /// Exact, case-sensitive lookup over `boards()`.
    async fn board_by_name(&self, name: &str) -> Result<Option<BoardRef>, TrackerError> {
        Ok(self.boards().await?.into_iter().find(|b| b.name == name))
    }

    /// Exact, case-sensitive lookup over `board_lists()`.
    async fn list_by_name(
        &self,
        board_id: &str,
        name: &str,
    ) -> Result<Option<ListRef>, TrackerError> {
        Ok(self
            .board_lists(board_id)
            .await?
            .into_iter()
            .find(|l| l.name == name))
    }
}
