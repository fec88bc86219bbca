//! HTTP client construction and reachability probe

use crate::config::ProxyConfig;
use crate::utils::error::{CertError, Result};
use reqwest::{Client, ClientBuilder, Proxy};
use std::time::Duration;
use tracing::{debug, warn};

/// Build the shared HTTP client
///
/// Proxy settings are applied to this client only; process-wide proxy
/// environment variables are left untouched.
pub fn build_client(
    user_agent: &str,
    timeout: Duration,
    proxy: Option<&ProxyConfig>,
) -> Result<Client> {
    let mut builder = ClientBuilder::new().timeout(timeout).user_agent(user_agent);

    if let Some(proxy_config) = proxy {
        let mut proxy = Proxy::all(proxy_config.url())
            .map_err(|e| CertError::config(format!("Invalid proxy configuration: {}", e)))?;
        if let Some((user, pass)) = proxy_config.credentials() {
            proxy = proxy.basic_auth(user, pass);
        }
        debug!("Routing lookups through proxy {}", proxy_config.url());
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| CertError::config(format!("Failed to build HTTP client: {}", e)))
}

/// True when `url` answers 2xx within the client's timeout
pub async fn probe(client: &Client, url: &str) -> bool {
    match client.get(url).send().await {
        Ok(response) if response.status().is_success() => true,
        Ok(response) => {
            warn!("Reachability probe {} returned {}", url, response.status());
            false
        }
        Err(e) => {
            warn!("Reachability probe {} failed: {}", url, e);
            false
        }
    }
}
