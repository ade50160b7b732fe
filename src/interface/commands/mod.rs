//! # Command Handlers
//!
//! Contains the handler for each supported command (help, getAll, getList, boards) and
//! builds the registry the dispatcher resolves against.

pub mod boards;
pub mod help;
pub mod retrieve;

use std::sync::Arc;

use crate::application::fetcher::BoardSnapshotFetcher;
use crate::application::registry::CommandRegistry;
use crate::domain::errors::RegistryError;

/// Marker users put in front of board and list names.
pub const NAME_MARKER: &str = "@@";

/// Registers every command, in the order the help listing shows them.
pub fn build_registry(
    prefix: &str,
    fetcher: Arc<BoardSnapshotFetcher>,
) -> Result<CommandRegistry, RegistryError> {
    let mut registry = CommandRegistry::with_prefix(prefix);
    registry.register(help::DESCRIPTOR, Arc::new(help::HelpCommand))?;
    registry.register(
        retrieve::GET_ALL,
        Arc::new(retrieve::GetAllCommand::new(fetcher.clone())),
    )?;
    registry.register(
        retrieve::GET_LIST,
        Arc::new(retrieve::GetListCommand::new(fetcher.clone())),
    )?;
    registry.register(boards::DESCRIPTOR, Arc::new(boards::BoardsCommand::new(fetcher)))?;
    Ok(registry)
}
