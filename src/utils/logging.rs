//! Logging sink initialization
//!
//! Only the binary calls this; the library just emits `tracing` events.

use crate::config::LoggingConfig;
use crate::utils::error::{CertError, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Daily log file path, `{dir}/certcheck_{YYYYMMDD}.log`
pub fn log_file_path(dir: &Path) -> PathBuf {
    dir.join(format!("certcheck_{}.log", Local::now().format("%Y%m%d")))
}

/// Install a stderr layer plus an append-only daily file layer
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<PathBuf> {
    let dir = PathBuf::from(&config.dir);
    std::fs::create_dir_all(&dir)
        .map_err(|e| CertError::Logging(format!("cannot create {}: {}", dir.display(), e)))?;

    let path = log_file_path(&dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| CertError::Logging(format!("cannot open {}: {}", path.display(), e)))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| CertError::Logging(format!("invalid log level '{}': {}", config.level, e)))?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();
    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CertError::Logging(e.to_string()))?;

    Ok(path)
}
