//! Listing of previous result artifacts

use crate::utils::error::Result;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// A result table found in the output directory
#[derive(Debug, Clone)]
pub struct ArtifactEntry {
    pub path: PathBuf,
    pub modified: DateTime<Local>,
    pub size: u64,
}

/// Most recent `limit` tables named `{prefix}*.csv`, newest first
///
/// A missing directory is not an error; it simply has no history.
pub fn recent_artifacts(dir: &Path, prefix: &str, limit: usize) -> Result<Vec<ArtifactEntry>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.starts_with(prefix) || !name.ends_with(".csv") {
            continue;
        }
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        entries.push(ArtifactEntry {
            path: entry.path(),
            modified: DateTime::<Local>::from(metadata.modified()?),
            size: metadata.len(),
        });
    }

    entries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.path.cmp(&a.path)));
    entries.truncate(limit);
    Ok(entries)
}
