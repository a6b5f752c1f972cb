//! Logging settings
//!
//! Console output always goes to stderr. When `log_dir` is set, a daily
//! rolling file is written there as well.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default `EnvFilter` directive when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info,numclass_rs=debug";

/// Default log file prefix inside `log_dir`
pub const DEFAULT_LOG_FILE_PREFIX: &str = "numclass.log";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,

    /// Directory for the rolling log file (console only when unset)
    pub log_dir: Option<PathBuf>,

    /// Prefix of the rolling log file names
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            log_dir: None,
            file_prefix: DEFAULT_LOG_FILE_PREFIX.to_string(),
        }
    }
}
