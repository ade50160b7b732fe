//! # Change Detector
//!
//! Compares two consecutive snapshots. Only removals and modifications of what was already
//! known are reported: boards that appear for the first time produce no events.

use crate::domain::types::{BoardSnapshot, ChangeEvent};

/// Events in board-then-card order of `previous`.
///
/// A card from `previous` that has no fully equal card on the same board in `current` yields
/// `CardChanged` carrying the previous card. Edits, deletions and moves all qualify.
pub fn diff(previous: &BoardSnapshot, current: &BoardSnapshot) -> Vec<ChangeEvent> {
    let mut events = Vec::new();
    for (board, old_items) in previous.boards() {
        let Some(new_items) = current.board(board) else {
            events.push(ChangeEvent::BoardRemoved {
                board: board.to_string(),
            });
            continue;
        };
        events.extend(
            old_items
                .iter()
                .filter(|old| !new_items.contains(old))
                .map(|old| ChangeEvent::CardChanged {
                    board: board.to_string(),
                    item: old.clone(),
                }),
        );
    }
    events
}
