//! Configuration validation
//!
//! Each section validates itself; `Config::validate` prefixes the section name.

use super::models::*;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for QueryConfig {
    fn validate(&self) -> Result<(), String> {
        // An empty endpoint is allowed here; commands that query check it.
        if !self.endpoint.is_empty() {
            let url = reqwest::Url::parse(&self.endpoint)
                .map_err(|e| format!("invalid endpoint '{}': {}", self.endpoint, e))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(format!("endpoint must be http(s), got '{}'", url.scheme()));
            }
        }
        if self.param_name.trim().is_empty() {
            return Err("param_name cannot be empty".to_string());
        }
        if self.absent_marker.trim().is_empty() {
            return Err("absent_marker cannot be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if let Some(proxy) = &self.proxy {
            if proxy.server.trim().is_empty() {
                return Err("proxy server cannot be empty".to_string());
            }
            if proxy.port == 0 {
                return Err("proxy port cannot be 0".to_string());
            }
        }
        Ok(())
    }
}

impl Validate for RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Validate for ProgressConfig {
    fn validate(&self) -> Result<(), String> {
        if self.emit_interval_ms == 0 {
            return Err("emit_interval_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for InputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name_column == 0 || self.id_column == 0 {
            return Err("column positions are 1-based".to_string());
        }
        if self.name_column == self.id_column {
            return Err(format!(
                "name_column and id_column both point at column {}",
                self.name_column
            ));
        }
        Ok(())
    }
}

impl Validate for OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.dir.trim().is_empty() {
            return Err("output dir cannot be empty".to_string());
        }
        if self.prefix.is_empty() || self.prefix.contains(['/', '\\']) {
            return Err(format!("invalid artifact prefix '{}'", self.prefix));
        }
        Ok(())
    }
}

impl Validate for ProbeConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled {
            reqwest::Url::parse(&self.url)
                .map_err(|e| format!("invalid probe url '{}': {}", self.url, e))?;
        }
        Ok(())
    }
}
