//! Utility modules
//!
//! - **error**: crate error type and constructors
//! - **logging**: subscriber setup for the binary
//! - **net**: HTTP client construction and reachability probe

pub mod error;
pub mod logging;
pub mod net;

pub use error::{CertError, Result};
