//! Configuration for the composer engine.
//!
//! Everything has an embedded default so the engine runs without any
//! config file; a TOML file and `COMPOSER_`-prefixed environment
//! variables layer on top.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Base URLs of the remote indicator and catalog APIs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Where and how often the session snapshot is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the session snapshot; empty means the platform
    /// data directory
    #[serde(default)]
    pub dir: String,
    /// Seconds between autosaves
    #[serde(default = "default_autosave_interval")]
    pub autosave_interval_secs: u64,
}

fn default_autosave_interval() -> u64 {
    5
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            autosave_interval_secs: default_autosave_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to a file under the session directory instead of stderr
    #[serde(default)]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: false,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the engine works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // User config in ~/.config/composer/ (optional overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("composer").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (caller override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with COMPOSER_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("COMPOSER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Directory the session snapshot and logs live in
    pub fn session_path(&self) -> PathBuf {
        if self.session.dir.is_empty() {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("composer")
        } else {
            PathBuf::from(&self.session.dir)
        }
    }

    pub fn logs_path(&self) -> PathBuf {
        self.session_path().join("logs")
    }
}
