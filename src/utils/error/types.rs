//! Error types for certcheck

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for certcheck
pub type Result<T> = std::result::Result<T, CertError>;

/// Main error type for certcheck
///
/// Per-record query failures never show up here: they are absorbed by the
/// retry policy and recorded as a `Failed` status on the outcome.
#[derive(Error, Debug)]
pub enum CertError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input is missing required columns or is not a readable workbook
    #[error("Format error: {0}")]
    Format(String),

    /// Every data row was rejected
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// Result artifact could not be created or written
    #[error("Persistence error at {path}: {message}")]
    Persistence {
        /// Destination that failed
        path: PathBuf,
        /// Underlying cause
        message: String,
    },

    /// Reachability pre-check failed
    #[error("Network error: {0}")]
    Network(String),

    /// Logging sink could not be installed
    #[error("Logging error: {0}")]
    Logging(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid YAML for `Config`
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
