//! Query session configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Remote lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Lookup endpoint; the identity number is sent as a query parameter
    #[serde(default)]
    pub endpoint: String,
    /// Name of the query parameter carrying the identity number
    #[serde(default = "default_param_name")]
    pub param_name: String,
    /// Page text meaning "no outstanding requirement"
    #[serde(default = "default_absent_marker")]
    pub absent_marker: String,
    /// Page text meaning "requirement outstanding"; when set, a page with
    /// neither marker is treated as ambiguous
    #[serde(default)]
    pub present_marker: Option<String>,
    /// Per-query timeout in seconds
    #[serde(default = "default_query_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Outbound proxy
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            param_name: default_param_name(),
            absent_marker: default_absent_marker(),
            present_marker: None,
            timeout_secs: default_query_timeout(),
            user_agent: default_user_agent(),
            proxy: None,
        }
    }
}

impl QueryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Proxy protocol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyKind {
    #[default]
    Http,
    Socks5,
}

impl ProxyKind {
    fn scheme(self) -> &'static str {
        match self {
            ProxyKind::Http => "http",
            ProxyKind::Socks5 => "socks5",
        }
    }
}

/// Proxy server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub kind: ProxyKind,
    pub server: String,
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Proxy URL without credentials
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.kind.scheme(), self.server, self.port)
    }

    /// Credentials, present only when both parts are non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}
