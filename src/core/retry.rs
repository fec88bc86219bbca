//! Per-record retry policy
//!
//! Each record runs `Attempting -> {Succeeded, Exhausted}`. The loop never
//! returns an error: exhaustion becomes a `Failed` outcome so one bad record
//! cannot stop the batch.

use crate::config::RetryConfig;
use crate::core::session::{QuerySession, SessionError};
use crate::core::types::{QueryOutcome, Record, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Bounded-attempt lookup of a single record
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    timeout: Duration,
}

impl RetryPolicy {
    /// `timeout` bounds every individual session call
    pub fn new(config: RetryConfig, timeout: Duration) -> Self {
        Self { config, timeout }
    }

    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts.max(1)
    }

    /// Query `record` until it succeeds or the attempt budget runs out
    pub async fn resolve<S>(&self, session: &mut S, record: &Record) -> QueryOutcome
    where
        S: QuerySession + ?Sized,
    {
        let max_attempts = self.max_attempts();
        let mut attempts = 0;

        loop {
            attempts += 1;

            let result = match tokio::time::timeout(
                self.timeout,
                session.query(&record.identity_number),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(SessionError::Timeout(self.timeout)),
            };

            match result {
                Ok(raw) => {
                    if attempts > 1 {
                        debug!(
                            "{} resolved on attempt {}",
                            record.identity_number, attempts
                        );
                    }
                    return QueryOutcome {
                        record: record.clone(),
                        status: StatusCode::from(raw),
                        attempts,
                        last_error: None,
                    };
                }
                Err(error) => {
                    if attempts >= max_attempts {
                        warn!(
                            "{} failed after {} attempt(s): {}",
                            record.identity_number, attempts, error
                        );
                        return QueryOutcome {
                            record: record.clone(),
                            status: StatusCode::Failed,
                            attempts,
                            last_error: Some(error.to_string()),
                        };
                    }

                    let delay = self.next_delay();
                    debug!(
                        "Attempt {} for {} failed: {}, retrying in {:?}",
                        attempts, record.identity_number, error, delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    fn next_delay(&self) -> Duration {
        let delay = self.config.delay();
        if !self.config.jitter || delay.is_zero() {
            return delay;
        }
        let jitter_factor = 0.1;
        let jitter = delay.as_millis() as f64 * jitter_factor * (rand::random::<f64>() - 0.5) * 2.0;
        Duration::from_millis((delay.as_millis() as f64 + jitter).max(0.0) as u64)
    }
}
