//! Test fixtures and data factories

use certcheck::config::RetryConfig;
use certcheck::core::{BatchOrchestrator, Interrupt, Record, RetryPolicy};
use std::time::Duration;

/// A valid record; panics on blank input since fixtures are trusted
pub fn record(name: &str, identity_number: &str) -> Record {
    Record::new(name, identity_number).expect("fixture record must be valid")
}

/// `count` records with distinct 18-character identity numbers
pub fn roster(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| record(&format!("Person {}", i), &format!("13012319900101{:04}", i)))
        .collect()
}

/// Orchestrator with no retry delay and progress emission effectively off
pub fn orchestrator(max_attempts: u32, interrupt: Interrupt) -> BatchOrchestrator {
    BatchOrchestrator::new(
        RetryPolicy::new(
            RetryConfig {
                max_attempts,
                delay_ms: 0,
                jitter: false,
            },
            Duration::from_secs(5),
        ),
        Duration::from_secs(3600),
        interrupt,
    )
}
