//! Persistence of batch results
//!
//! - `sink.rs` — writes a run to a new, collision-free artifact
//! - `history.rs` — lists earlier artifacts

pub mod history;
pub mod sink;

pub use history::{ArtifactEntry, recent_artifacts};
pub use sink::{PROVENANCE_MARKER, PersistedArtifact, ResultSink};
