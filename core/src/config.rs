//! Process-wide search defaults and their persistence.
//!
//! Stores defaults in JSON format at `~/.portseek/config.json`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Defaults every search starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defaults {
    /// The lowest port to begin any port search from.
    #[serde(default = "default_base_port")]
    pub base_port: u32,

    /// The highest port any port search may reach.
    #[serde(default = "default_highest_port")]
    pub highest_port: u32,

    /// Path (without the `.sock` suffix) socket searches start from.
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,

    /// Permission mode for socket directories the search creates.
    #[serde(default = "default_socket_mode")]
    pub socket_mode: u32,
}

fn default_base_port() -> u32 {
    8000
}

fn default_highest_port() -> u32 {
    65535
}

fn default_base_path() -> PathBuf {
    PathBuf::from("/tmp/portseek")
}

fn default_socket_mode() -> u32 {
    0o755
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            base_port: default_base_port(),
            highest_port: default_highest_port(),
            base_path: default_base_path(),
            socket_mode: default_socket_mode(),
        }
    }
}

impl Defaults {
    /// Check the defaults describe a searchable range.
    pub fn validate(&self) -> Result<()> {
        if self.highest_port > u32::from(u16::MAX) {
            return Err(Error::Config(format!(
                "highestPort({}) is greater than {}",
                self.highest_port,
                u16::MAX
            )));
        }
        if self.base_port > self.highest_port {
            return Err(Error::Config(format!(
                "basePort({}) is greater than highestPort({})",
                self.base_port, self.highest_port
            )));
        }
        Ok(())
    }
}

/// Configuration store for the persisted defaults.
///
/// Handles reading and writing `~/.portseek/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.portseek/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        let config_path = home.join(".portseek").join("config.json");

        Ok(Self { config_path })
    }

    /// Create a config store with a custom path (for testing).
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> PathBuf {
        self.config_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load defaults from disk.
    ///
    /// Returns built-in defaults if the file doesn't exist.
    pub async fn load(&self) -> Result<Defaults> {
        if !self.config_path.exists() {
            return Ok(Defaults::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        let defaults: Defaults = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        defaults.validate()?;
        Ok(defaults)
    }

    /// Save defaults to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, defaults: &Defaults) -> Result<()> {
        defaults.validate()?;

        let config_dir = self.config_dir();
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .await
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(defaults)?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }

    /// Set the lowest port searches begin from.
    pub async fn set_base_port(&self, port: u32) -> Result<()> {
        let mut defaults = self.load().await?;
        defaults.base_port = port;
        self.save(&defaults).await
    }

    /// Set the highest port searches may reach.
    pub async fn set_highest_port(&self, port: u32) -> Result<()> {
        let mut defaults = self.load().await?;
        defaults.highest_port = port;
        self.save(&defaults).await
    }

    /// Set the path socket searches begin from.
    pub async fn set_base_path(&self, path: PathBuf) -> Result<()> {
        let mut defaults = self.load().await?;
        defaults.base_path = path;
        self.save(&defaults).await
    }
}
