//! # Application Layer
//!
//! Contains the core logic of the bot: command registration and dispatch, board snapshots,
//! change detection, and the background poller.

pub mod detector;
pub mod dispatcher;
pub mod fetcher;
pub mod logging;
pub mod pagination;
pub mod poller;
pub mod registry;
pub mod sender;

#[cfg(test)]
pub mod test_helpers;
