//! Input and output layout configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fixed column positions of the input workbook (1-based)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_name_column")]
    pub name_column: usize,
    #[serde(default = "default_id_column")]
    pub id_column: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            name_column: default_name_column(),
            id_column: default_id_column(),
        }
    }
}

impl InputConfig {
    /// Minimum number of columns a sheet must have
    pub fn min_columns(&self) -> usize {
        self.name_column.max(self.id_column)
    }
}

/// Result artifact destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    /// Artifact filename prefix
    #[serde(default = "default_output_prefix")]
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            prefix: default_output_prefix(),
        }
    }
}

impl OutputConfig {
    pub fn dir_path(&self) -> PathBuf {
        PathBuf::from(&self.dir)
    }
}
