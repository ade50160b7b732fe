//! # Room Sender
//!
//! Binds a chat room and the user who spoke in it into a `CommandSender`, with capability
//! checks driven by the `commands.restricted` and `system.admin` settings.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, CommandSender};

/// Which commands are admin-only, and who the admins are.
#[derive(Debug, Clone, Default)]
pub struct Permissions {
    restricted: HashSet<String>,
    admins: Vec<String>,
}

impl Permissions {
    pub fn new(restricted: impl IntoIterator<Item = String>, admins: Vec<String>) -> Self {
        Self {
            restricted: restricted.into_iter().collect(),
            admins,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.commands.restricted.iter().cloned(),
            config.system.admin.clone(),
        )
    }

    pub fn is_admin(&self, user: &str) -> bool {
        self.admins.iter().any(|a| a.to_lowercase() == user.to_lowercase())
    }

    pub fn allows(&self, user: &str, command: &str) -> bool {
        !self.restricted.contains(command) || self.is_admin(user)
    }
}

pub struct RoomSender<C> {
    chat: C,
    user_id: String,
    permissions: Arc<Permissions>,
}

impl<C: ChatProvider> RoomSender<C> {
    pub fn new(chat: C, user_id: impl Into<String>, permissions: Arc<Permissions>) -> Self {
        Self {
            chat,
            user_id: user_id.into(),
            permissions,
        }
    }
}

#[async_trait]
impl<C: ChatProvider> CommandSender for RoomSender<C> {
    async fn send_message(&self, content: &str) -> Result<(), String> {
        self.chat.send_message(content).await.map(|_| ())
    }

    fn has_capability(&self, command: &str) -> bool {
        self.permissions.allows(&self.user_id, command)
    }

    fn id(&self) -> &str {
        &self.user_id
    }
}
