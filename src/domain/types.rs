//! # Domain Types
//!
//! Boards, cards and change events shared by the snapshot fetcher, the change detector and the commands.

use std::collections::{BTreeMap, HashSet};

use crate::strings::messages::escape_markdown;

/// A single tracked work card.
///
/// Equality compares every field: a card whose title, list, description, labels or due date
/// changed is no longer equal to its previous version, even though the id is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacklogItem {
    pub id: String,
    pub title: String,
    /// Name of the list (status column) holding the card.
    pub status: String,
    pub description: String,
    pub labels: Vec<String>,
    pub due: Option<String>,
}

impl BacklogItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: status.into(),
            description: String::new(),
            labels: Vec::new(),
            due: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_due(mut self, due: impl Into<String>) -> Self {
        self.due = Some(due.into());
        self
    }

    /// One-line rendering used by the listing commands.
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "- [{}] {}",
            escape_markdown(&self.status),
            escape_markdown(&self.title)
        );
        if !self.labels.is_empty() {
            let labels: Vec<String> = self.labels.iter().map(|l| escape_markdown(l)).collect();
            line.push_str(&format!(" ({})", labels.join(", ")));
        }
        if let Some(due) = &self.due {
            line.push_str(&format!(" · due {}", format_due(due)));
        }
        line
    }
}

fn format_due(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Drops later cards that repeat an id already seen, keeping the first occurrence.
pub fn unique_by_id(items: Vec<BacklogItem>) -> Vec<BacklogItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect()
}

/// Remote board reference as returned by board enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRef {
    pub id: String,
    pub name: String,
}

/// Remote list (status column) reference within one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRef {
    pub id: String,
    pub name: String,
}

/// Every observable board and its cards at one instant.
///
/// There are no mutating methods: a new poll always produces a fresh snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    boards: BTreeMap<String, Vec<BacklogItem>>,
}

impl BoardSnapshot {
    /// Builds a snapshot from `(board name, cards)` pairs.
    ///
    /// A repeated board name keeps its first entry; repeated card ids within a board are dropped.
    pub fn from_boards<I>(boards: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<BacklogItem>)>,
    {
        let mut map = BTreeMap::new();
        for (name, items) in boards {
            if map.contains_key(&name) {
                tracing::warn!(
                    "Ignoring repeated board name '{}' ({} cards)",
                    name,
                    items.len()
                );
                continue;
            }
            map.insert(name, unique_by_id(items));
        }
        Self { boards: map }
    }

    pub fn board(&self, name: &str) -> Option<&[BacklogItem]> {
        self.boards.get(name).map(Vec::as_slice)
    }

    pub fn boards(&self) -> impl Iterator<Item = (&str, &[BacklogItem])> {
        self.boards
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn card_count(&self) -> usize {
        self.boards.values().map(Vec::len).sum()
    }
}

/// A difference detected between two consecutive snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    BoardRemoved { board: String },
    /// `item` is the card as it was in the previous snapshot.
    CardChanged { board: String, item: BacklogItem },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_covers_full_content() {
        let a = BacklogItem::new("1", "Write docs", "To Do");
        let b = BacklogItem::new("1", "Write more docs", "To Do");
        let c = BacklogItem::new("1", "Write docs", "Doing");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, a.clone());
        assert_ne!(a, a.clone().with_description("details"));
    }

    #[test]
    fn test_snapshot_drops_duplicate_card_ids() {
        let snapshot = BoardSnapshot::from_boards(vec![(
            "Sprint".to_string(),
            vec![
                BacklogItem::new("1", "First", "To Do"),
                BacklogItem::new("1", "Duplicate", "Done"),
                BacklogItem::new("2", "Second", "To Do"),
            ],
        )]);
        let items = snapshot.board("Sprint").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "First");
        assert_eq!(items[1].id, "2");
    }

    #[test]
    fn test_snapshot_keeps_first_board_with_repeated_name() {
        let snapshot = BoardSnapshot::from_boards(vec![
            ("Sprint".to_string(), vec![BacklogItem::new("1", "A", "To Do")]),
            ("Sprint".to_string(), vec![]),
        ]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.card_count(), 1);
    }

    #[test]
    fn test_summary_line_formats_labels_and_due_date() {
        let item = BacklogItem::new("1", "Ship it", "Doing")
            .with_labels(vec!["urgent".to_string(), "backend".to_string()])
            .with_due("2024-03-01T12:00:00.000Z");
        assert_eq!(
            item.summary_line(),
            "- [Doing] Ship it (urgent, backend) · due 2024-03-01"
        );
    }

    #[test]
    fn test_summary_line_keeps_unparseable_due_date() {
        let item = BacklogItem::new("1", "Ship it", "Doing").with_due("soon");
        assert_eq!(item.summary_line(), "- [Doing] Ship it · due soon");
    }

    #[test]
    fn test_summary_line_escapes_card_text() {
        let item = BacklogItem::new("1", "Rename *all* __init__ files", "To <Do>")
            .with_labels(vec!["[ui]".to_string()]);
        assert_eq!(
            item.summary_line(),
            r"- [To \<Do\>] Rename \*all\* \_\_init\_\_ files (\[ui\])"
        );
    }
}
