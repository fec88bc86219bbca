//! # certcheck
//!
//! Sequential bulk lookup of pension certification status.
//!
//! A roster of `(name, identity number)` rows is read from a workbook, each
//! identity is looked up against a single remote service with bounded
//! retries, and the outcomes are written to a new, never-overwritten result
//! artifact. One failing record never aborts the batch, and an interrupted
//! batch still persists what it finished.
//!
//! ## Pipeline
//!
//! ```rust,no_run
//! use certcheck::core::{BatchOrchestrator, HttpQuerySession, Interrupt, LogObserver, RecordSource};
//! use certcheck::storage::ResultSink;
//! use certcheck::Config;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None).await?;
//!     let input = Path::new("roster.xlsx");
//!     let loaded = RecordSource::new(config.input.clone()).load(input)?;
//!     let session = HttpQuerySession::new(&config.query)?;
//!
//!     let orchestrator = BatchOrchestrator::from_config(&config, Interrupt::new());
//!     let run = orchestrator.run(loaded.records, session, &mut LogObserver).await;
//!
//!     let artifact = ResultSink::new(&config.output).persist(&run, input)?;
//!     println!("saved to {}", artifact.table.display());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{CertError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build information stamped into result provenance
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build time (unix seconds)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
