//! Configuration module for numclass-rs
//!
//! This module handles pipeline configuration:
//! - Queue capacity and output location
//! - Bounded shutdown of the consumer after the producer finishes
//! - Run summary and logging options (see [`settings`])
//!
//! # Config Location
//!
//! The configuration is a TOML file looked up in this order:
//! 1. The path in the `NUMCLASS_CONFIG` environment variable
//! 2. `config.toml` in the platform config directory under `numclass-rs`:
//!    - **Linux**: `~/.config/numclass-rs/config.toml`
//!    - **macOS**: `~/Library/Application Support/numclass-rs/config.toml`
//!    - **Windows**: `%APPDATA%\numclass-rs\config.toml`
//! 3. Built-in defaults
//!
//! # Example
//!
//! ```toml
//! capacity = 50
//! output_dir = "out"
//! shutdown_timeout_ms = 5000
//! write_summary = true
//!
//! [logging]
//! filter = "info"
//! log_dir = "logs"
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{NumClassError, Result};
use crate::pipeline::queue::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application identifier for config directories
pub const APP_ID: &str = "numclass-rs";

/// Config filename inside the app config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "NUMCLASS_CONFIG";

/// Summary filename written to the output directory
pub const SUMMARY_FILE: &str = "summary.json";

/// Get the platform config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID).join(CONFIG_FILE))
}

/// Resolve which config file to read, if any.
///
/// The environment override is returned even if the file does not exist so
/// that a typo is reported instead of silently ignored.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    default_config_path().filter(|p| p.exists())
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum number of buffered items between producer and consumer
    pub capacity: usize,

    /// Directory receiving one `<category>.out` file per category
    pub output_dir: PathBuf,

    /// How long the consumer may keep draining after the producer finished
    /// before the run is cancelled. `None` waits indefinitely.
    pub shutdown_timeout_ms: Option<u64>,

    /// Write a JSON run summary next to the category files
    pub write_summary: bool,

    /// Logging options
    pub logging: LoggingSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            output_dir: PathBuf::from("."),
            shutdown_timeout_ms: None,
            write_summary: false,
            logging: LoggingSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Load from the resolved config location, defaults if there is none.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Load config, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Load and validate a config file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NumClassError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            NumClassError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save config as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NumClassError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| NumClassError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            NumClassError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(NumClassError::Config(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.shutdown_timeout_ms == Some(0) {
            return Err(NumClassError::Config(
                "shutdown_timeout_ms must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn shutdown_timeout(&self) -> Option<Duration> {
        self.shutdown_timeout_ms.map(Duration::from_millis)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE)
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }
}
