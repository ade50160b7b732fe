//! # Trello Integration
//!
//! REST client for the Trello API and the wire formats it decodes.

pub mod client;
pub mod wire;

pub use client::TrelloClient;
