//! Configuration data models
//!
//! This module defines all configuration structures used by certcheck.

pub mod io;
pub mod query;
pub mod retry;
pub mod runtime;

// Re-export all configuration types
pub use io::*;
pub use query::*;
pub use retry::*;
pub use runtime::*;

/// Default lookup page parameter carrying the identity number
pub fn default_param_name() -> String {
    "idcard".to_string()
}

/// Marker the lookup page renders when no outstanding requirement exists
pub fn default_absent_marker() -> String {
    "暂无数据".to_string()
}

/// Default per-query timeout in seconds
pub fn default_query_timeout() -> u64 {
    60
}

pub fn default_user_agent() -> String {
    format!("certcheck/{}", env!("CARGO_PKG_VERSION"))
}

/// Default maximum attempts per record
pub fn default_max_attempts() -> u32 {
    3
}

/// Default delay between attempts in milliseconds
pub fn default_retry_delay_ms() -> u64 {
    2000
}

pub fn default_true() -> bool {
    true
}

/// Default minimum interval between progress lines in milliseconds
pub fn default_emit_interval_ms() -> u64 {
    1000
}

/// Name column, 1-based (column C)
pub fn default_name_column() -> usize {
    3
}

/// Identity number column, 1-based (column E)
pub fn default_id_column() -> usize {
    5
}

pub fn default_output_dir() -> String {
    "results".to_string()
}

pub fn default_output_prefix() -> String {
    "cert_results".to_string()
}

pub fn default_log_dir() -> String {
    "logs".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_probe_url() -> String {
    "https://www.baidu.com".to_string()
}

/// Default probe timeout in seconds
pub fn default_probe_timeout() -> u64 {
    10
}
