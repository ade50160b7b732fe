//! Trello API response format

use serde::Deserialize;

use crate::domain::types::{BacklogItem, BoardRef, ListRef};

#[derive(Debug, Deserialize)]
pub struct WireBoard {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct WireList {
    pub id: String,
    pub name: String,
    /// Present only when requested with `cards=open`.
    #[serde(default)]
    pub cards: Vec<WireCard>,
}

#[derive(Debug, Deserialize)]
pub struct WireCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub labels: Vec<WireLabel>,
    #[serde(default)]
    pub due: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireLabel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl From<WireBoard> for BoardRef {
    fn from(board: WireBoard) -> Self {
        Self {
            id: board.id,
            name: board.name,
        }
    }
}

impl WireList {
    pub fn list_ref(&self) -> ListRef {
        ListRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    pub fn into_items(self) -> Vec<BacklogItem> {
        let status = self.name;
        self.cards
            .into_iter()
            .map(|card| card.into_item(&status))
            .collect()
    }
}

impl WireCard {
    pub fn into_item(self, status: &str) -> BacklogItem {
        let labels = self
            .labels
            .into_iter()
            .filter_map(WireLabel::display_name)
            .collect();
        let item = BacklogItem::new(self.id, self.name, status)
            .with_description(self.desc)
            .with_labels(labels);
        match self.due {
            Some(due) => item.with_due(due),
            None => item,
        }
    }
}

impl WireLabel {
    /// Unnamed labels fall back to their colour.
    fn display_name(self) -> Option<String> {
        if self.name.is_empty() {
            self.color
        } else {
            Some(self.name)
        }
    }
}
