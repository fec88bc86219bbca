//! Helper functions for creating specific error types

use super::types::CertError;
use std::path::Path;

impl CertError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn format<S: Into<String>>(message: S) -> Self {
        Self::Format(message.into())
    }

    pub fn empty_dataset<S: Into<String>>(message: S) -> Self {
        Self::EmptyDataset(message.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn persistence<P: AsRef<Path>, S: ToString>(path: P, cause: S) -> Self {
        Self::Persistence {
            path: path.as_ref().to_path_buf(),
            message: cause.to_string(),
        }
    }

    /// Whether the error stems from the shape of the input file.
    ///
    /// The binary uses this to print the column-layout hint.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Format(_) | Self::EmptyDataset(_))
    }
}
