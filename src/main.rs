#![recursion_limit = "256"]
//! # Main Entry Point
//!
//! Wires the layers together:
//! - Domain: Configuration, Types and Traits
//! - Infrastructure: Matrix, Trello
//! - Application: Registry, Dispatcher, Fetcher, Poller, Logging
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::{MessageType, SyncRoomMessageEvent},
    },
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::dispatcher::CommandDispatcher;
use crate::application::fetcher::BoardSnapshotFetcher;
use crate::application::poller::{PollerHandle, PollingScheduler};
use crate::application::sender::{Permissions, RoomSender};
use crate::domain::config::AppConfig;
use crate::infrastructure::matrix::{MatrixNotifier, MatrixService};
use crate::infrastructure::trello::TrelloClient;
use crate::strings::logs;

#[derive(Debug, Parser)]
#[command(name = "boardwatch", about = "Matrix bot for querying and watching Trello boards")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "data/config.yaml")]
    config: PathBuf,

    /// Directory for the session log
    #[arg(long, default_value = "data")]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&cli.config)?;

    // 2. Logging Setup
    let _log_guard = application::logging::init(&cli.log_dir)?;
    tracing::info!("Starting Boardwatch...");
    tracing::info!("{}", logs::config_loaded(&config.services.matrix.username));

    // 3. Initialize Infrastructure
    let trello = TrelloClient::new(&config.services.trello)
        .context("Failed to initialize Trello client")?;
    let fetcher = Arc::new(BoardSnapshotFetcher::new(Arc::new(trello)));

    // 4. Initialize Application Components
    let registry = interface::commands::build_registry(&config.commands.prefix, fetcher.clone())
        .context("Failed to register commands")?;
    let dispatcher = Arc::new(CommandDispatcher::new(registry));
    let permissions = Arc::new(Permissions::from_config(&config));

    // 5. Matrix Setup
    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await
        .context("Failed to build Matrix client")?;

    client
        .matrix_auth()
        .login_username(
            &config.services.matrix.username,
            &config.services.matrix.password,
        )
        .send()
        .await
        .context("Matrix login failed")?;

    tracing::info!("{}", logs::LOGIN_SUCCESS);

    if let Some(name) = &config.services.matrix.display_name {
        if let Err(e) = client.account().set_display_name(Some(name.as_str())).await {
            tracing::warn!("{}", logs::set_display_name_fail(&e.to_string()));
        }
    }

    // 6. Change Poller
    let poller: Option<PollerHandle> = match &config.services.trello.notify_channel {
        Some(channel) => {
            let notifier = MatrixNotifier::new(client.clone(), channel)?;
            tracing::info!(
                "{}",
                logs::poller_started(config.services.trello.interval, channel)
            );
            Some(
                PollingScheduler::new(fetcher.clone(), Arc::new(notifier), config.poll_interval())
                    .start(),
            )
        }
        None => {
            tracing::warn!("{}", logs::POLLER_DISABLED);
            None
        }
    };

    // 7. Event Handlers
    let start_time = std::time::SystemTime::now();
    let loop_dispatcher = dispatcher.clone();
    let loop_permissions = permissions.clone();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let dispatcher = loop_dispatcher.clone();
        let permissions = loop_permissions.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time =
                std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            let MessageType::Text(text_content) = &original_msg.content.msgtype else {
                return;
            };
            if original_msg.sender == room.own_user_id() {
                return;
            }

            let body = &text_content.body;
            if !dispatcher.is_command(body) {
                return;
            }
            tracing::info!("Received command from {}: {}", original_msg.sender, body);

            let sender = RoomSender::new(
                MatrixService::new(room),
                original_msg.sender.as_str(),
                permissions,
            );
            dispatcher.dispatch(body, &sender).await;
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            if let Err(e) = room.join().await {
                tracing::warn!("{}", logs::join_invite_fail(&e.to_string()));
            }
        }
    });

    // 8. Sync until shutdown
    tracing::info!("{}", logs::SYNC_LOOP_START);
    let sync_client = client.clone();
    let sync_handle = tokio::spawn(async move { sync_client.sync(SyncSettings::default()).await });

    tokio::select! {
        res = sync_handle => {
            match res {
                Ok(Err(e)) => tracing::error!("{}", logs::sync_loop_fail(&e.to_string())),
                Err(e) => tracing::error!("{}", logs::sync_loop_fail(&e.to_string())),
                Ok(Ok(())) => {}
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("{}", logs::SHUTDOWN);
        }
    }

    if let Some(poller) = poller {
        poller.stop().await;
    }

    Ok(())
}
