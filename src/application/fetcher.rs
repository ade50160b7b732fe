//! # Board Snapshot Fetcher
//!
//! Shapes tracking-service calls into snapshots and per-board or per-list card listings.
//! Read-only with respect to the remote service.

use futures::stream::{self, StreamExt};
use std::sync::Arc;

use crate::domain::errors::TrackerError;
use crate::domain::traits::BoardService;
use crate::domain::types::{BacklogItem, BoardRef, BoardSnapshot, unique_by_id};

/// Card fetches allowed in flight at once during a full snapshot.
pub const BOARD_FETCH_CONCURRENCY: usize = 4;

pub struct BoardSnapshotFetcher {
    service: Arc<dyn BoardService>,
}

impl BoardSnapshotFetcher {
    pub fn new(service: Arc<dyn BoardService>) -> Self {
        Self { service }
    }

    /// Every visible board with all of its cards.
    ///
    /// A board that disappears between enumeration and card retrieval is left out of the
    /// snapshot. Any `Unavailable` failure fails the whole fetch.
    pub async fn fetch_all(&self) -> Result<BoardSnapshot, TrackerError> {
        let boards = self.service.boards().await?;
        let requests: Vec<_> = boards
            .iter()
            .map(|b| self.service.board_cards(&b.id))
            .collect();
        let cards: Vec<_> = stream::iter(requests)
            .buffered(BOARD_FETCH_CONCURRENCY)
            .collect()
            .await;

        let mut fetched = Vec::with_capacity(boards.len());
        for (board, result) in boards.into_iter().zip(cards) {
            match result {
                Ok(items) => fetched.push((board.name, items)),
                Err(TrackerError::NotFound(what)) => {
                    tracing::debug!("Board '{}' vanished during fetch: {}", board.name, what);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(BoardSnapshot::from_boards(fetched))
    }

    /// Cards of the board with exactly this name, irrespective of list.
    pub async fn fetch_board(&self, name: &str) -> Result<Vec<BacklogItem>, TrackerError> {
        let board = self.board(name).await?;
        Ok(unique_by_id(self.service.board_cards(&board.id).await?))
    }

    /// Cards of one list within one board, both matched by exact name.
    pub async fn fetch_list(
        &self,
        board_name: &str,
        list_name: &str,
    ) -> Result<Vec<BacklogItem>, TrackerError> {
        let board = self.board(board_name).await?;
        let list = self
            .service
            .list_by_name(&board.id, list_name)
            .await?
            .ok_or_else(|| TrackerError::NotFound(format!("list '{list_name}'")))?;
        Ok(unique_by_id(self.service.list_cards(&list).await?))
    }

    pub async fn board_names(&self) -> Result<Vec<String>, TrackerError> {
        Ok(self
            .service
            .boards()
            .await?
            .into_iter()
            .map(|b| b.name)
            .collect())
    }

    async fn board(&self, name: &str) -> Result<BoardRef, TrackerError> {
        self.service
            .board_by_name(name)
            .await?
            .ok_or_else(|| TrackerError::NotFound(format!("board '{name}'")))
    }
}
