//! Scripted query session
//!
//! Replies are scripted per identity number and consumed in order; once a
//! script runs out the default reply is used. Calls and shutdowns are
//! recorded in a shared `SessionLog` that outlives the session, since the
//! orchestrator takes the session by value.

use async_trait::async_trait;
use certcheck::core::{Interrupt, QuerySession, RawStatus, SessionError};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

type Reply = Result<RawStatus, SessionError>;

/// Observations shared between a test and its session
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    calls: Arc<Mutex<Vec<String>>>,
    shutdowns: Arc<Mutex<usize>>,
}

impl SessionLog {
    /// Identity numbers queried, one entry per attempt
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, identity_number: &str) -> usize {
        self.calls()
            .iter()
            .filter(|id| id.as_str() == identity_number)
            .count()
    }

    pub fn shutdowns(&self) -> usize {
        *self.shutdowns.lock().unwrap()
    }
}

pub struct ScriptedSession {
    scripts: HashMap<String, VecDeque<Reply>>,
    default: Reply,
    log: SessionLog,
    trip: Option<(usize, Interrupt)>,
}

impl ScriptedSession {
    /// Session that answers `status` for every identity
    pub fn answering(status: RawStatus) -> Self {
        Self::with_default(Ok(status))
    }

    /// Session that fails every identity with `error`
    pub fn failing(error: SessionError) -> Self {
        Self::with_default(Err(error))
    }

    fn with_default(default: Reply) -> Self {
        Self {
            scripts: HashMap::new(),
            default,
            log: SessionLog::default(),
            trip: None,
        }
    }

    /// Replies for `identity_number`, consumed one per attempt
    pub fn script(mut self, identity_number: &str, replies: Vec<Reply>) -> Self {
        self.scripts
            .insert(identity_number.to_string(), replies.into());
        self
    }

    /// Trigger `interrupt` as soon as `calls` queries have been answered
    pub fn interrupt_after(mut self, calls: usize, interrupt: Interrupt) -> Self {
        self.trip = Some((calls, interrupt));
        self
    }

    pub fn log(&self) -> SessionLog {
        self.log.clone()
    }
}

#[async_trait]
impl QuerySession for ScriptedSession {
    async fn query(&mut self, identity_number: &str) -> Result<RawStatus, SessionError> {
        let answered = {
            let mut calls = self.log.calls.lock().unwrap();
            calls.push(identity_number.to_string());
            calls.len()
        };

        let reply = self
            .scripts
            .get_mut(identity_number)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| self.default.clone());

        if let Some((after, interrupt)) = &self.trip {
            if answered >= *after {
                interrupt.trigger();
            }
        }
        reply
    }

    async fn shutdown(&mut self) {
        *self.log.shutdowns.lock().unwrap() += 1;
    }
}
