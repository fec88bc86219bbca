//! Rolling progress statistics with throttled emission

use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Point-in-time view handed to progress observers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
    pub mean_latency: Duration,
    pub eta: Duration,
}

impl ProgressSnapshot {
    /// One-line rendering, e.g. `37/120 (30.8%) avg 4.2s ETA 00:05:49`
    pub fn render(&self) -> String {
        format!(
            "{}/{} ({:.1}%) avg {:.1}s ETA {}",
            self.completed,
            self.total,
            self.percent,
            self.mean_latency.as_secs_f64(),
            format_hms(self.eta)
        )
    }
}

fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Completed count, running mean latency, and emission throttle
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    completed: usize,
    mean: Duration,
    min_interval: Duration,
    last_emit: Instant,
}

impl ProgressTracker {
    /// The first emission is allowed one interval after `started`
    pub fn new(total: usize, min_interval: Duration, started: Instant) -> Self {
        Self {
            total,
            completed: 0,
            mean: Duration::ZERO,
            min_interval,
            last_emit: started,
        }
    }

    /// Account for one finished record
    pub fn record(&mut self, elapsed: Duration) {
        self.completed += 1;
        let n = self.completed as f64;
        let mean = self.mean.as_secs_f64();
        let updated = mean + (elapsed.as_secs_f64() - mean) / n;
        self.mean = Duration::from_secs_f64(updated.max(0.0));
    }

    /// True at most once per minimum interval; a true answer starts a new interval
    pub fn should_emit(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_emit) >= self.min_interval {
            self.last_emit = now;
            true
        } else {
            false
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn mean_latency(&self) -> Duration {
        self.mean
    }

    /// Remaining records times the running mean
    pub fn eta(&self) -> Duration {
        let remaining = self.total.saturating_sub(self.completed) as u32;
        self.mean * remaining
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let percent = if self.total == 0 {
            100.0
        } else {
            self.completed as f64 * 100.0 / self.total as f64
        };
        ProgressSnapshot {
            completed: self.completed,
            total: self.total,
            percent,
            mean_latency: self.mean,
            eta: self.eta(),
        }
    }
}
