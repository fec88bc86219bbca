//! Environment overrides
//!
//! Applied once by the binary after the YAML file is read. The core never
//! looks at process environment.

use super::Config;
use super::models::ProxyConfig;
use crate::utils::error::{CertError, Result};
use tracing::debug;

pub const ENV_ENDPOINT: &str = "CERTCHECK_ENDPOINT";
pub const ENV_PROXY_SERVER: &str = "CERTCHECK_PROXY_SERVER";
pub const ENV_PROXY_PORT: &str = "CERTCHECK_PROXY_PORT";
pub const ENV_OUTPUT_DIR: &str = "CERTCHECK_OUTPUT_DIR";
pub const ENV_LOG_LEVEL: &str = "CERTCHECK_LOG_LEVEL";
pub const ENV_MAX_ATTEMPTS: &str = "CERTCHECK_MAX_ATTEMPTS";

impl Config {
    /// Apply `CERTCHECK_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            debug!("{} overrides query endpoint", ENV_ENDPOINT);
            self.query.endpoint = endpoint;
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output.dir = dir;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(attempts) = lookup(ENV_MAX_ATTEMPTS) {
            self.retry.max_attempts = attempts
                .parse()
                .map_err(|e| CertError::config(format!("Invalid {}: {}", ENV_MAX_ATTEMPTS, e)))?;
        }

        let server = lookup(ENV_PROXY_SERVER);
        let port = lookup(ENV_PROXY_PORT);
        if let (Some(server), Some(port)) = (server, port) {
            let port: u16 = port
                .parse()
                .map_err(|e| CertError::config(format!("Invalid {}: {}", ENV_PROXY_PORT, e)))?;
            let previous = self.query.proxy.take();
            self.query.proxy = Some(ProxyConfig {
                kind: previous.as_ref().map(|p| p.kind).unwrap_or_default(),
                server,
                port,
                username: previous.as_ref().and_then(|p| p.username.clone()),
                password: previous.and_then(|p| p.password),
            });
        }
        Ok(())
    }
}
