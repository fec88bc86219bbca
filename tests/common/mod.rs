//! Common test utilities for certcheck
//!
//! - `session`: a scripted `QuerySession` with a call log
//! - `fixtures`: records and orchestrators with zero retry delay

pub mod fixtures;
pub mod session;

pub use fixtures::{orchestrator, record, roster};
pub use session::{ScriptedSession, SessionLog};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
