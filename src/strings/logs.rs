//! # Log Lines
//!
//! Messages written to the tracing log rather than to chat.

pub fn config_loaded(user: &str) -> String {
    format!("Loaded configuration for user: {user}")
}

pub const LOGIN_SUCCESS: &str = "Logged in successfully!";

pub fn set_display_name_fail(err: &str) -> String {
    format!("Failed to set display name: {err}")
}

pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}

pub const SHUTDOWN: &str = "Shutting down...";

pub fn join_invite_fail(err: &str) -> String {
    format!("Failed to join room after invite: {err}")
}

pub const POLLER_DISABLED: &str =
    "No services.trello.notify_channel configured; change polling is disabled.";

pub fn poller_started(interval_secs: u64, channel: &str) -> String {
    format!("Listener started: polling every {interval_secs}s, announcing to {channel}")
}

pub const CYCLE_START: &str = "Listener task cycle started.";
pub const CYCLE_END: &str = "Listener task cycle ended.";
pub const POLLER_STOPPED: &str = "Listener task stopped.";

pub fn cycle_abandoned(err: &str, consecutive: u32) -> String {
    format!("Listener cycle abandoned ({consecutive} consecutive failures): {err}")
}

pub fn notify_failed(err: &str) -> String {
    format!("Failed to announce change: {err}")
}

pub fn reply_failed(sender: &str, err: &str) -> String {
    format!("Failed to reply to {sender}: {err}")
}
