//! Configuration loading and management.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. YAML file (`task-board.yaml`, or `TASK_BOARD_CONFIG`)
//! 3. Environment variables (a `.env` file in the working directory is loaded first)
//! 4. CLI flags, applied by the binary
//!
//! ## Environment Variables
//! - `DB_NAME` - Database name; becomes `<DB_NAME>.db` unless it has an extension
//! - `DB_HOST`, `DB_USER`, `DB_PASS` - Accepted for networked stores; unused by SQLite
//! - `PORT` - Service port (default: 5000)
//! - `TASK_BOARD_API_URL` - Client base URL (default: `http://localhost:5000`)
//! - `TASK_BOARD_CONFIG` - Explicit config file path

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default service port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default client base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "task-board.yaml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

/// Task store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database name. Resolved to a file path by [`StoreConfig::db_path`].
    #[serde(default = "default_db_name")]
    pub name: String,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_db_name(),
            host: None,
            user: None,
            password: None,
        }
    }
}

fn default_db_name() -> String {
    "tasks".to_string()
}

impl StoreConfig {
    /// SQLite file path for the configured database name.
    pub fn db_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.name);
        if path.extension().is_some() {
            path
        } else {
            path.with_extension("db")
        }
    }

    /// Warn about settings the embedded store cannot use.
    pub fn warn_unused(&self) {
        for (key, value) in [
            ("DB_HOST", &self.host),
            ("DB_USER", &self.user),
            ("DB_PASS", &self.password),
        ] {
            if value.is_some() {
                warn!(setting = key, "Ignored: the embedded SQLite store has no server");
            }
        }
    }
}

/// HTTP service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Load from the explicit path, `TASK_BOARD_CONFIG`, or the default file,
    /// then apply environment overrides.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        let _ = dotenv::dotenv();

        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("TASK_BOARD_CONFIG").map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("DB_NAME").filter(|s| !s.is_empty()) {
            self.store.name = name;
        }
        if let Some(host) = lookup("DB_HOST") {
            self.store.host = Some(host);
        }
        if let Some(user) = lookup("DB_USER") {
            self.store.user = Some(user);
        }
        if let Some(pass) = lookup("DB_PASS") {
            self.store.password = Some(pass);
        }

        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %port, "Invalid PORT, keeping {}", self.server.port),
            }
        }

        if let Some(url) = lookup("TASK_BOARD_API_URL").filter(|s| !s.is_empty()) {
            self.client.api_url = url;
        }
    }

    /// Ensure the database directory exists.
    pub fn ensure_db_dir(&self) -> Result<()> {
        if let Some(parent) = self.store.db_path().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
