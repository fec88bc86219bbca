//! Result sink: write a finished or partial batch to a new artifact
//!
//! The table is `{prefix}_{unix_seconds}.csv`, UTF-8 with a BOM so
//! spreadsheet tools pick the right encoding. A `{stem}.json` provenance
//! sidecar sits next to it. Existing files are never overwritten: each
//! candidate name is claimed with create-new semantics and a `_1`, `_2`, ...
//! suffix is tried on collision.

use crate::config::OutputConfig;
use crate::core::types::{BatchRun, StatusCode};
use crate::utils::error::{CertError, Result};
use chrono::{DateTime, Utc};
use polars::prelude::{CsvWriter, SerWriter};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fixed provenance marker written into every sidecar
pub const PROVENANCE_MARKER: &str = "generated-by certcheck";

const MAX_SUFFIX: u32 = 100;

/// Where a run ended up
#[derive(Debug, Clone)]
pub struct PersistedArtifact {
    pub table: PathBuf,
    pub provenance: PathBuf,
    pub rows: usize,
}

#[derive(Serialize)]
struct Provenance<'a> {
    marker: &'static str,
    version: &'static str,
    git_hash: &'static str,
    source: String,
    table: String,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    total: usize,
    completed: usize,
    interrupted: bool,
    mean_latency_secs: f64,
    counts: BTreeMap<&'a str, usize>,
}

/// Persists batch runs into an output directory
#[derive(Debug, Clone)]
pub struct ResultSink {
    dir: PathBuf,
    prefix: String,
}

impl ResultSink {
    pub fn new(config: &OutputConfig) -> Self {
        Self::with_dir(config.dir_path(), &config.prefix)
    }

    pub fn with_dir<P: Into<PathBuf>>(dir: P, prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Persist `run`, recording `hint` (the input path) as its source
    pub fn persist(&self, run: &BatchRun, hint: &Path) -> Result<PersistedArtifact> {
        self.persist_at(run, hint, Utc::now())
    }

    /// Persist using an explicit run timestamp for the filename
    pub fn persist_at(
        &self,
        run: &BatchRun,
        hint: &Path,
        timestamp: DateTime<Utc>,
    ) -> Result<PersistedArtifact> {
        std::fs::create_dir_all(&self.dir).map_err(|e| CertError::persistence(&self.dir, e))?;

        let (table, mut file) = self.claim(timestamp.timestamp())?;
        if let Err(e) = write_table(&mut file, run, &table) {
            drop(file);
            let _ = std::fs::remove_file(&table);
            return Err(e);
        }

        // A table without its sidecar is not a finished artifact.
        let provenance = table.with_extension("json");
        if let Err(e) = write_provenance(&provenance, &table, run, hint) {
            let _ = std::fs::remove_file(&table);
            return Err(e);
        }

        info!(
            "Saved {} result rows to {}",
            run.results.len(),
            table.display()
        );
        Ok(PersistedArtifact {
            table,
            provenance,
            rows: run.results.len(),
        })
    }

    fn claim(&self, stamp: i64) -> Result<(PathBuf, File)> {
        for suffix in 0..MAX_SUFFIX {
            let name = if suffix == 0 {
                format!("{}_{}.csv", self.prefix, stamp)
            } else {
                format!("{}_{}_{}.csv", self.prefix, stamp, suffix)
            };
            let path = self.dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("{} already exists, trying next suffix", path.display());
                }
                Err(e) => return Err(CertError::persistence(&path, e)),
            }
        }
        Err(CertError::persistence(
            &self.dir,
            format!("no free artifact name for timestamp {}", stamp),
        ))
    }
}

fn write_table(file: &mut File, run: &BatchRun, path: &Path) -> Result<()> {
    let names: Vec<&str> = run.results.iter().map(|o| o.record.name.as_str()).collect();
    let ids: Vec<&str> = run
        .results
        .iter()
        .map(|o| o.record.identity_number.as_str())
        .collect();
    let statuses: Vec<&str> = run.results.iter().map(|o| o.status.as_str()).collect();

    let mut df = polars::df!(
        "name" => names,
        "identity_number" => ids,
        "status" => statuses
    )
    .map_err(|e| CertError::persistence(path, e))?;

    CsvWriter::new(&mut *file)
        .include_bom(true)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| CertError::persistence(path, e))?;
    file.sync_all().map_err(|e| CertError::persistence(path, e))
}

fn write_provenance(path: &Path, table: &Path, run: &BatchRun, hint: &Path) -> Result<()> {
    let build = crate::build_info();
    let counts = StatusCode::ALL
        .iter()
        .map(|status| (status.as_str(), run.count(*status)))
        .collect();
    let provenance = Provenance {
        marker: PROVENANCE_MARKER,
        version: build.version,
        git_hash: build.git_hash,
        source: hint.display().to_string(),
        table: table
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        started_at: run.started_at,
        finished_at: run.finished_at,
        total: run.total,
        completed: run.completed,
        interrupted: run.interrupted,
        mean_latency_secs: run.running_mean_latency.as_secs_f64(),
        counts,
    };

    let body =
        serde_json::to_vec_pretty(&provenance).map_err(|e| CertError::persistence(path, e))?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| CertError::persistence(path, e))?;
    file.write_all(&body)
        .and_then(|_| file.sync_all())
        .map_err(|e| CertError::persistence(path, e))
}
