//! Cooperative interruption flag

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Exit status when a second signal abandons the record in flight
const FORCED_EXIT_CODE: i32 = 130;

/// How a stop request was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopRequest {
    /// First request: finish the current record, then save
    Graceful,
    /// A stop was already pending
    Forced,
}

/// Shared stop request, checked by the orchestrator between records
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Trip the flag, reporting whether a stop was already pending
    pub fn request_stop(&self) -> StopRequest {
        if self.flag.swap(true, Ordering::SeqCst) {
            StopRequest::Forced
        } else {
            StopRequest::Graceful
        }
    }

    /// Trip the flag on Ctrl+C (and SIGTERM on unix)
    ///
    /// The first signal lets the record in flight finish. A second one exits
    /// the process at once without saving.
    pub fn listen_for_signals(&self) -> JoinHandle<()> {
        let interrupt = self.clone();
        tokio::spawn(async move {
            loop {
                wait_for_signal().await;
                match interrupt.request_stop() {
                    StopRequest::Graceful => info!(
                        "Interrupt received, finishing the current record and saving partial results \
                         (interrupt again to exit immediately)"
                    ),
                    StopRequest::Forced => {
                        warn!("Second interrupt received, exiting without saving");
                        std::process::exit(FORCED_EXIT_CODE);
                    }
                }
            }
        })
    }
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
