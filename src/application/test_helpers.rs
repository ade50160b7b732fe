//! In-memory fakes for the chat sender, the notification sink and the tracking service.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::domain::errors::TrackerError;
use crate::domain::traits::{BoardService, CommandSender, NotificationSink};
use crate::domain::types::{BacklogItem, BoardRef, ListRef};

pub fn item(id: &str, title: &str, status: &str) -> BacklogItem {
    BacklogItem::new(id, title, status)
}

/// Records every reply; denies the capabilities it was told to.
pub struct RecordingSender {
    id: String,
    denied: Vec<String>,
    pub messages: Mutex<Vec<String>>,
}

impl RecordingSender {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            denied: Vec::new(),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn deny(mut self, command: &str) -> Self {
        self.denied.push(command.to_string());
        self
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandSender for RecordingSender {
    async fn send_message(&self, content: &str) -> Result<(), String> {
        self.messages.lock().unwrap().push(content.to_string());
        Ok(())
    }

    fn has_capability(&self, command: &str) -> bool {
        !self.denied.iter().any(|d| d == command)
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, content: &str) -> Result<(), String> {
        self.messages.lock().unwrap().push(content.to_string());
        Ok(())
    }
}

/// Rejects every notification.
pub struct FailingSink;

#[async_trait]
impl NotificationSink for FailingSink {
    async fn notify(&self, _content: &str) -> Result<(), String> {
        Err("room not joined".to_string())
    }
}

/// Boards keyed by name; board ids are `id-<name>`, list ids `<board id>/<status>`.
#[derive(Default)]
pub struct FakeBoardService {
    boards: Mutex<BTreeMap<String, Vec<BacklogItem>>>,
    unavailable: AtomicBool,
    /// Boards still enumerated whose card fetch answers `NotFound`.
    vanished: Mutex<HashSet<String>>,
    pub board_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeBoardService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_board(&self, name: &str, items: Vec<BacklogItem>) {
        self.boards.lock().unwrap().insert(name.to_string(), items);
    }

    pub fn remove_board(&self, name: &str) {
        self.boards.lock().unwrap().remove(name);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn vanish_cards(&self, name: &str) {
        self.vanished.lock().unwrap().insert(name.to_string());
    }

    fn check(&self) -> Result<(), TrackerError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TrackerError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }

    fn items_for(&self, board_id: &str) -> Result<Vec<BacklogItem>, TrackerError> {
        let name = board_id
            .strip_prefix("id-")
            .ok_or_else(|| TrackerError::NotFound(board_id.to_string()))?;
        self.boards
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(board_id.to_string()))
    }
}

#[async_trait]
impl BoardService for FakeBoardService {
    async fn boards(&self) -> Result<Vec<BoardRef>, TrackerError> {
        self.check()?;
        self.board_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .boards
            .lock()
            .unwrap()
            .keys()
            .map(|name| BoardRef {
                id: format!("id-{name}"),
                name: name.clone(),
            })
            .collect())
    }

    async fn board_cards(&self, board_id: &str) -> Result<Vec<BacklogItem>, TrackerError> {
        self.check()?;
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let name = board_id.strip_prefix("id-").unwrap_or(board_id);
        if self.vanished.lock().unwrap().contains(name) {
            return Err(TrackerError::NotFound(board_id.to_string()));
        }
        self.items_for(board_id)
    }

    async fn board_lists(&self, board_id: &str) -> Result<Vec<ListRef>, TrackerError> {
        self.check()?;
        let mut lists: Vec<ListRef> = Vec::new();
        for item in self.items_for(board_id)? {
            if !lists.iter().any(|l| l.name == item.status) {
                lists.push(ListRef {
                    id: format!("{board_id}/{}", item.status),
                    name: item.status.clone(),
                });
            }
        }
        Ok(lists)
    }

    async fn list_cards(&self, list: &ListRef) -> Result<Vec<BacklogItem>, TrackerError> {
        self.check()?;
        let (board_id, _) = list
            .id
            .split_once('/')
            .ok_or_else(|| TrackerError::NotFound(list.id.clone()))?;
        Ok(self
            .items_for(board_id)?
            .into_iter()
            .filter(|item| item.status == list.name)
            .collect())
    }
}
