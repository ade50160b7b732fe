//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for the Matrix protocol using the `matrix_sdk`, and a
//! `NotificationSink` that posts change announcements into one configured room.

use anyhow::{Context, Result};
use async_trait::async_trait;
use matrix_sdk::Client;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::OwnedRoomId;
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;

use crate::domain::traits::{ChatProvider, NotificationSink};

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.room_id(), content);
        self.room
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn send_notification(&self, content: &str) -> Result<(), String> {
        // Notifications are also markdown messages for now
        self.send_message(content).await.map(|_| ())
    }
}

/// Posts into the announcement room, looked up on every send so a late join still works.
pub struct MatrixNotifier {
    client: Client,
    room_id: OwnedRoomId,
}

impl MatrixNotifier {
    pub fn new(client: Client, room_id: &str) -> Result<Self> {
        let room_id = OwnedRoomId::try_from(room_id)
            .with_context(|| format!("Invalid notify_channel room id: {room_id}"))?;
        Ok(Self { client, room_id })
    }
}

#[async_trait]
impl NotificationSink for MatrixNotifier {
    async fn notify(&self, content: &str) -> Result<(), String> {
        let room = self
            .client
            .get_room(&self.room_id)
            .ok_or_else(|| format!("Not joined to room {}", self.room_id))?;
        MatrixService::new(room).send_notification(content).await
    }
}
