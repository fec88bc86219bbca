//! Domain types shared by the batch pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identity-number lengths the registry issues
pub const TYPICAL_ID_LENGTHS: [usize; 2] = [15, 18];

/// One identity to be checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub identity_number: String,
}

impl Record {
    /// Build a normalized record, or `None` when either field is blank
    ///
    /// Both fields are trimmed; the identity number is upper-cased so a
    /// lowercase `x` checksum matches the registry's form.
    pub fn new(name: &str, identity_number: &str) -> Option<Self> {
        let name = name.trim();
        let identity_number = identity_number.trim();
        if name.is_empty() || identity_number.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            identity_number: identity_number.to_uppercase(),
        })
    }

    pub fn has_typical_id_length(&self) -> bool {
        TYPICAL_ID_LENGTHS.contains(&self.identity_number.chars().count())
    }
}

/// Unmapped signal returned by a query session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawStatus {
    /// The page shows an outstanding requirement
    Present,
    /// The page shows the "no data" marker
    Absent,
    /// Neither could be determined
    Ambiguous,
}

/// Domain outcome of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    Certified,
    NotCertified,
    Inconclusive,
    Failed,
}

impl StatusCode {
    pub const ALL: [StatusCode; 4] = [
        StatusCode::Certified,
        StatusCode::NotCertified,
        StatusCode::Inconclusive,
        StatusCode::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Certified => "Certified",
            StatusCode::NotCertified => "NotCertified",
            StatusCode::Inconclusive => "Inconclusive",
            StatusCode::Failed => "Failed",
        }
    }
}

impl From<RawStatus> for StatusCode {
    /// "No record" on the lookup page means nothing is outstanding, i.e. the
    /// person is already certified.
    fn from(raw: RawStatus) -> Self {
        match raw {
            RawStatus::Present => StatusCode::NotCertified,
            RawStatus::Absent => StatusCode::Certified,
            RawStatus::Ambiguous => StatusCode::Inconclusive,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved result of one record after retries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub record: Record,
    pub status: StatusCode,
    pub attempts: u32,
    pub last_error: Option<String>,
}

/// State of one batch execution
#[derive(Debug, Clone)]
pub struct BatchRun {
    pub total: usize,
    pub completed: usize,
    pub running_mean_latency: Duration,
    /// Outcomes in input order
    pub results: Vec<QueryOutcome>,
    /// Stopped early by an interrupt
    pub interrupted: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BatchRun {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            running_mean_latency: Duration::ZERO,
            results: Vec::with_capacity(total),
            interrupted: false,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn count(&self, status: StatusCode) -> usize {
        self.results.iter().filter(|o| o.status == status).count()
    }

    /// Records never reached because of an interrupt
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }
}
