//! # Domain Layer
//!
//! Core definitions, types, and traits that define the business domain of the application.
//! Independent of the chat platform and the tracking service, serving as the contract for other layers.

pub mod config;
pub mod errors;
pub mod traits;
pub mod types;
