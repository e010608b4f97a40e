// ABOUTME: Scripted Lifecycle API fake shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use computer_use_viewer::lifecycle::{CommandReply, LifecycleApi, LifecycleError, StatusReport};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const DISPLAY_URL: &str = "http://localhost:6080/vnc.html?autoconnect=true";

/// One scripted status response: how long it takes to resolve and what it resolves to.
pub struct ScriptedStatus {
    pub delay: Duration,
    pub result: Result<StatusReport, LifecycleError>,
}

impl ScriptedStatus {
    pub fn report(status: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(StatusReport::new(status)),
        }
    }

    pub fn failure() -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(LifecycleError::Transport("connection refused".to_string())),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Status responses are served from a script in call order; once it runs out the VM reports `stopped`.
pub struct ScriptedApi {
    statuses: Mutex<VecDeque<ScriptedStatus>>,
    start_reply: Mutex<Option<Result<CommandReply, LifecycleError>>>,
    status_calls: AtomicUsize,
    start_calls: AtomicUsize,
    stop_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new(statuses: Vec<ScriptedStatus>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into()),
            start_reply: Mutex::new(None),
            status_calls: AtomicUsize::new(0),
            start_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_start_reply(self, reply: Result<CommandReply, LifecycleError>) -> Self {
        *self.start_reply.lock().unwrap() = Some(reply);
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.status_calls() + self.start_calls() + self.stop_calls()
    }
}

#[async_trait]
impl LifecycleApi for ScriptedApi {
    async fn status(&self) -> Result<StatusReport, LifecycleError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.statuses.lock().unwrap().pop_front();
        match next {
            Some(scripted) => {
                if !scripted.delay.is_zero() {
                    tokio::time::sleep(scripted.delay).await;
                }
                scripted.result
            }
            None => Ok(StatusReport::new("stopped")),
        }
    }

    async fn start(&self) -> Result<CommandReply, LifecycleError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.start_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(CommandReply::ok()))
    }

    async fn stop(&self) -> Result<CommandReply, LifecycleError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        Ok(CommandReply::ok())
    }
}
