//! Query session boundary
//!
//! A session performs one remote lookup per call. Implementations may keep
//! state between calls (cookies, a browser tab) but every call must either
//! complete or fail without poisoning the next one.

mod http;

pub use http::HttpQuerySession;

use crate::core::types::RawStatus;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Call exceeded the caller-supplied bound
    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    /// Connection-level failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Remote answered with an unexpected status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Page loaded but could not be interpreted
    #[error("page error: {0}")]
    Page(String),

    /// Remote refused the request (4xx); anti-automation layers do this
    /// transiently, so it is retried like any other failure
    #[error("rejected: {0}")]
    Rejected(String),
}

/// One connected lookup handle
#[async_trait]
pub trait QuerySession: Send {
    /// Look up one identity number
    async fn query(&mut self, identity_number: &str) -> Result<RawStatus, SessionError>;

    /// Release the underlying resource; called once at batch end
    async fn shutdown(&mut self) {}
}

#[async_trait]
impl<S: QuerySession + ?Sized> QuerySession for Box<S> {
    async fn query(&mut self, identity_number: &str) -> Result<RawStatus, SessionError> {
        (**self).query(identity_number).await
    }

    async fn shutdown(&mut self) {
        (**self).shutdown().await
    }
}
