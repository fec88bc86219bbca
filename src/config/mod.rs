//! Configuration management for certcheck
//!
//! This module handles loading, validation, and management of all configuration.

pub mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{CertError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/certcheck.yaml";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CertError::config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load an explicit file, or the default location when it exists
    ///
    /// An explicitly named file must exist; a missing default file means
    /// built-in defaults.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path).await,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH).await
            }
            None => {
                debug!("No config file at {}, using defaults", DEFAULT_CONFIG_PATH);
                Ok(Self::default())
            }
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.query
            .validate()
            .map_err(|e| CertError::config(format!("Query config error: {}", e)))?;
        self.retry
            .validate()
            .map_err(|e| CertError::config(format!("Retry config error: {}", e)))?;
        self.progress
            .validate()
            .map_err(|e| CertError::config(format!("Progress config error: {}", e)))?;
        self.input
            .validate()
            .map_err(|e| CertError::config(format!("Input config error: {}", e)))?;
        self.output
            .validate()
            .map_err(|e| CertError::config(format!("Output config error: {}", e)))?;
        self.probe
            .validate()
            .map_err(|e| CertError::config(format!("Probe config error: {}", e)))?;

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| CertError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
