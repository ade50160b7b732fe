//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes command replies, error messages, and change notification templates.

use crate::domain::errors::{CommandError, TrackerError};
use crate::domain::types::ChangeEvent;

pub const AUTH_DENIED: &str = "🚫 **Authorization Denied**.";
pub const UNKNOWN_COMMAND: &str = "❓ Unknown command.";
pub const COMMAND_CRASHED: &str = "❌ Something went wrong while running that command.";

pub const INVALID_HELP_PAGE: &str = "Error: You must enter a valid help page.";
pub const BOARD_NAME_REQUIRED: &str =
    "There should be the name of a board. Check usage for details.";
pub const BOARD_AND_LIST_REQUIRED: &str =
    "There should be the name of a board and the name of a list. Check usage for details.";
pub const NO_ACCESS: &str = "Unfortunately you don't have access to a board with that name.";
pub const SERVICE_UNAVAILABLE: &str =
    "Unfortunately the board service can't be reached right now. Try again later.";
pub const NO_BOARDS: &str = "No boards are visible with the configured credentials.";

/// Backslash-escapes text from the board service so it renders literally as markdown.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '&' | '~' | '|') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub fn page_out_of_range(max: usize) -> String {
    format!("Error: Input a number from 1 to {max}")
}

pub fn help_header(page: usize, total: usize) -> String {
    format!(" ---- Help -- Page {page} / {total} ---- ")
}

pub fn help_next_page(prefix: &str, next: usize) -> String {
    format!("Type {prefix}help {next} to read the next page.")
}

pub fn help_entry(prefix: &str, usage: &str, help: &str) -> String {
    format!("`{prefix}{usage}` - {help}")
}

pub fn board_empty(board: &str) -> String {
    format!("Board {} has no cards.", escape_markdown(board))
}

pub fn list_empty(board: &str, list: &str) -> String {
    format!(
        "List {} on board {} has no cards.",
        escape_markdown(list),
        escape_markdown(board)
    )
}

pub fn board_listing_header(count: usize) -> String {
    format!("**Boards ({count})**")
}

/// The single reply sent when a handler fails.
pub fn command_error(err: &CommandError) -> String {
    match err {
        CommandError::Validation(msg) => msg.clone(),
        CommandError::OutOfRange { max } => page_out_of_range(*max),
        CommandError::Tracker(TrackerError::NotFound(_)) => NO_ACCESS.to_string(),
        CommandError::Tracker(TrackerError::Unavailable(_)) => SERVICE_UNAVAILABLE.to_string(),
    }
}

pub fn change_notification(event: &ChangeEvent) -> String {
    match event {
        ChangeEvent::BoardRemoved { board } => format!(
            "Trello information refreshed: \nBoard {} is deleted or renamed.",
            escape_markdown(board)
        ),
        ChangeEvent::CardChanged { board, item } => format!(
            "Trello information refreshed: \nCard {} on board {} is modified.",
            escape_markdown(&item.title),
            escape_markdown(board)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::BacklogItem;

    #[test]
    fn test_tracker_errors_never_leak_details() {
        let err = CommandError::Tracker(TrackerError::NotFound("board id 5f3a".into()));
        assert_eq!(command_error(&err), NO_ACCESS);
        let err = CommandError::Tracker(TrackerError::Unavailable("connect refused".into()));
        assert!(!command_error(&err).contains("refused"));
    }

    #[test]
    fn test_card_notification_uses_item_title() {
        let event = ChangeEvent::CardChanged {
            board: "Sprint".into(),
            item: BacklogItem::new("1", "Old title", "To Do"),
        };
        let text = change_notification(&event);
        assert!(text.contains("Card Old title"));
        assert!(text.contains("Sprint"));
    }

    #[test]
    fn test_notification_escapes_markup_in_titles() {
        let event = ChangeEvent::CardChanged {
            board: "UI_v2".into(),
            item: BacklogItem::new("1", "Fix <Button> layout", "To Do"),
        };
        let text = change_notification(&event);
        assert!(text.contains(r"Card Fix \<Button\> layout on board UI\_v2"));
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("plain text 1.2"), "plain text 1.2");
        assert_eq!(
            escape_markdown(r"a\b `c` ~d~ x|y & z"),
            r"a\\b \`c\` \~d\~ x\|y \& z"
        );
    }
}
