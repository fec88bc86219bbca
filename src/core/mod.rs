//! Batch query core
//!
//! Leaves first: `types`, `source`, `session`, `retry`, `progress`, `batch`.
//! Nothing here reads process environment or installs global state.

pub mod batch;
pub mod progress;
pub mod retry;
pub mod session;
pub mod source;
pub mod types;

pub use batch::{BatchOrchestrator, Interrupt, LogObserver, ProgressObserver, StopRequest};
pub use progress::{ProgressSnapshot, ProgressTracker};
pub use retry::RetryPolicy;
pub use session::{HttpQuerySession, QuerySession, SessionError};
pub use source::{LoadedRecords, RecordSource, RowIssue, RowIssueKind};
pub use types::{BatchRun, QueryOutcome, RawStatus, Record, StatusCode};
