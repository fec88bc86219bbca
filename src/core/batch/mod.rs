//! Batch orchestrator
//!
//! Drives every record through the retry policy strictly one at a time, in
//! input order, and always hands back a `BatchRun`, partial or complete.

mod interrupt;

pub use interrupt::{Interrupt, StopRequest};

use crate::config::Config;
use crate::core::progress::{ProgressSnapshot, ProgressTracker};
use crate::core::retry::RetryPolicy;
use crate::core::session::QuerySession;
use crate::core::types::{BatchRun, Record, StatusCode};
use chrono::Utc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Receives throttled progress updates
pub trait ProgressObserver: Send {
    fn on_progress(&mut self, snapshot: &ProgressSnapshot);
}

/// Observer that only logs
#[derive(Debug, Default)]
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn on_progress(&mut self, snapshot: &ProgressSnapshot) {
        info!("Progress {}", snapshot.render());
    }
}

/// Sequential driver of one batch
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    retry: RetryPolicy,
    emit_interval: Duration,
    interrupt: Interrupt,
}

impl BatchOrchestrator {
    pub fn new(retry: RetryPolicy, emit_interval: Duration, interrupt: Interrupt) -> Self {
        Self {
            retry,
            emit_interval,
            interrupt,
        }
    }

    pub fn from_config(config: &Config, interrupt: Interrupt) -> Self {
        Self::new(
            RetryPolicy::new(config.retry.clone(), config.query.timeout()),
            config.progress.emit_interval(),
            interrupt,
        )
    }

    /// Process `records` in order through `session`
    ///
    /// The session is shut down exactly once before returning, whether the
    /// batch finished or was interrupted.
    pub async fn run<S>(
        &self,
        records: Vec<Record>,
        mut session: S,
        observer: &mut dyn ProgressObserver,
    ) -> BatchRun
    where
        S: QuerySession,
    {
        let total = records.len();
        let mut run = BatchRun::new(total);
        let mut tracker = ProgressTracker::new(total, self.emit_interval, Instant::now());
        info!(
            "Starting batch of {} records (max {} attempts each)",
            total,
            self.retry.max_attempts()
        );

        for (index, record) in records.into_iter().enumerate() {
            if self.interrupt.is_triggered() {
                warn!(
                    "Batch interrupted after {} of {} records",
                    run.completed, total
                );
                run.interrupted = true;
                break;
            }

            debug!(
                "[{}/{}] querying {} {}",
                index + 1,
                total,
                record.name,
                record.identity_number
            );
            let started = Instant::now();
            let outcome = self.retry.resolve(&mut session, &record).await;
            tracker.record(started.elapsed());

            info!(
                "[{}/{}] {} {}: {}",
                index + 1,
                total,
                outcome.record.name,
                outcome.record.identity_number,
                outcome.status
            );
            run.results.push(outcome);
            run.completed = tracker.completed();
            run.running_mean_latency = tracker.mean_latency();

            if tracker.should_emit(Instant::now()) {
                observer.on_progress(&tracker.snapshot());
            }
        }

        session.shutdown().await;
        run.finished_at = Some(Utc::now());

        info!(
            "Batch finished: {} certified, {} not certified, {} inconclusive, {} failed, {} not reached",
            run.count(StatusCode::Certified),
            run.count(StatusCode::NotCertified),
            run.count(StatusCode::Inconclusive),
            run.count(StatusCode::Failed),
            run.remaining()
        );
        run
    }
}
