//! Progress, logging and probe configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Progress emission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_emit_interval_ms")]
    pub emit_interval_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            emit_interval_ms: default_emit_interval_ms(),
        }
    }
}

impl ProgressConfig {
    pub fn emit_interval(&self) -> Duration {
        Duration::from_millis(self.emit_interval_ms)
    }
}

/// Logging sink settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for the daily log file
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Fallback filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

/// Reachability pre-check settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_probe_url")]
    pub url: String,
    #[serde(default = "default_probe_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_probe_url(),
            timeout_secs: default_probe_timeout(),
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
