//! # Domain Errors
//!
//! Typed failures raised by the tracking service, the command handlers and the registry.

use thiserror::Error;

/// Failure reported by the remote tracking service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// The board or list does not exist, or the credentials cannot see it.
    #[error("not found: {0}")]
    NotFound(String),
    /// The service could not be reached or answered with a server error.
    #[error("tracking service unavailable: {0}")]
    Unavailable(String),
}

impl TrackerError {
    /// Whether the next poll cycle may succeed where this one failed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Failure raised by a command handler. Converted to a single reply by the dispatcher.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Malformed user input. Carries the message shown to the sender.
    #[error("{0}")]
    Validation(String),
    /// A requested page outside `1..=max`.
    #[error("page out of range (1..{max})")]
    OutOfRange { max: usize },
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Startup-time registration failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("command name or alias '{0}' is already registered")]
    Conflict(String),
}
