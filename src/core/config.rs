//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub const DEFAULT_PREFIX: &str = "r!";
pub const DEFAULT_SAVES_DIR: &str = "saves";
pub const DEFAULT_HELP_PATH: &str = "help.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub command_prefix: String,
    pub saves_dir: PathBuf,
    pub help_path: PathBuf,
    pub project_url: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Build configuration from the process environment.
    ///
    /// `DISCORD_TOKEN` is the only required variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discord_token = non_empty("DISCORD_TOKEN")
            .ok_or_else(|| anyhow!("DISCORD_TOKEN environment variable is required"))?;

        let command_prefix = match lookup("COMMAND_PREFIX") {
            Some(p) if p.trim().is_empty() => {
                return Err(anyhow!("COMMAND_PREFIX must not be empty"));
            }
            Some(p) => p,
            None => DEFAULT_PREFIX.to_string(),
        };

        Ok(Self {
            discord_token,
            command_prefix,
            saves_dir: non_empty("SAVES_DIR")
                .unwrap_or_else(|| DEFAULT_SAVES_DIR.to_string())
                .into(),
            help_path: non_empty("HELP_PATH")
                .unwrap_or_else(|| DEFAULT_HELP_PATH.to_string())
                .into(),
            project_url: non_empty("PROJECT_URL"),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}
