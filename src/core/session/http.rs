//! HTTP-backed query session

use super::{QuerySession, SessionError};
use crate::config::QueryConfig;
use crate::core::types::RawStatus;
use crate::utils::error::{CertError, Result};
use crate::utils::net::build_client;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::debug;

/// Looks up certification status with a plain GET against the lookup page
pub struct HttpQuerySession {
    client: Client,
    endpoint: Url,
    param_name: String,
    absent_marker: String,
    present_marker: Option<String>,
    timeout: Duration,
    served: u64,
}

impl HttpQuerySession {
    pub fn new(config: &QueryConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(CertError::config(
                "query endpoint is not set (query.endpoint or CERTCHECK_ENDPOINT)",
            ));
        }
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| CertError::config(format!("invalid endpoint: {}", e)))?;
        let client = build_client(&config.user_agent, config.timeout(), config.proxy.as_ref())?;

        Ok(Self {
            client,
            endpoint,
            param_name: config.param_name.clone(),
            absent_marker: config.absent_marker.clone(),
            present_marker: config.present_marker.clone().filter(|m| !m.is_empty()),
            timeout: config.timeout(),
            served: 0,
        })
    }

    fn classify_body(&self, body: &str) -> RawStatus {
        if body.contains(&self.absent_marker) {
            return RawStatus::Absent;
        }
        match &self.present_marker {
            Some(marker) if body.contains(marker.as_str()) => RawStatus::Present,
            Some(_) => RawStatus::Ambiguous,
            None if body.trim().is_empty() => RawStatus::Ambiguous,
            None => RawStatus::Present,
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> SessionError {
        if error.is_timeout() {
            SessionError::Timeout(self.timeout)
        } else {
            SessionError::Transport(error.to_string())
        }
    }
}

fn classify_status(status: StatusCode) -> SessionError {
    let message = status
        .canonical_reason()
        .unwrap_or("unexpected status")
        .to_string();
    match status.as_u16() {
        408 | 429 => SessionError::Http {
            status: status.as_u16(),
            message,
        },
        400..=499 => SessionError::Rejected(format!("HTTP {}: {}", status.as_u16(), message)),
        code => SessionError::Http {
            status: code,
            message,
        },
    }
}

#[async_trait]
impl QuerySession for HttpQuerySession {
    async fn query(&mut self, identity_number: &str) -> std::result::Result<RawStatus, SessionError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[(self.param_name.as_str(), identity_number)])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        self.served += 1;
        Ok(self.classify_body(&body))
    }

    async fn shutdown(&mut self) {
        debug!("HTTP session closed after {} successful lookups", self.served);
    }
}
