//! Error handling
//!
//! Crate-level error type plus constructors. Session-level failures live in
//! `core::session` because they never cross the retry boundary.

mod helpers;
mod types;

pub use types::{CertError, Result};
