//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the Matrix and Trello services, the command surface and admins.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
    pub trello: TrelloConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Credentials and polling settings for Trello.
#[derive(Debug, Deserialize, Clone)]
pub struct TrelloConfig {
    pub key: String,
    pub token: String,
    /// Poll interval in seconds.
    #[serde(default = "default_interval")]
    pub interval: u64,
    /// Room that receives change announcements. Polling is off without it.
    #[serde(default)]
    pub notify_channel: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_interval() -> u64 {
    300
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommandsConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Canonical command names only admins may see and run.
    #[serde(default)]
    pub restricted: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            restricted: Vec::new(),
        }
    }
}

fn default_prefix() -> String {
    "!".to_string()
}

/// System-level settings for the bot.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct SystemConfig {
    #[serde(default)]
    pub admin: Vec<String>,
}

const PLACEHOLDER_KEY: &str = "trello_key";
const PLACEHOLDER_TOKEN: &str = "trello_token";

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).context("Failed to parse config YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let trello = &self.services.trello;
        if trello.key.trim().is_empty() || trello.key == PLACEHOLDER_KEY {
            bail!("services.trello.key is missing or still the placeholder value");
        }
        if trello.token.trim().is_empty() || trello.token == PLACEHOLDER_TOKEN {
            bail!("services.trello.token is missing or still the placeholder value");
        }
        if trello.interval == 0 {
            bail!("services.trello.interval must be at least 1 second");
        }
        if self.commands.prefix.is_empty() || self.commands.prefix.contains(char::is_whitespace) {
            bail!("commands.prefix must be non-empty and contain no whitespace");
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.services.trello.interval)
    }
}
