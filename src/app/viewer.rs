// ABOUTME: Viewer widget controller that polls VM status and issues start/stop commands
// Requests run as background tasks; their results are applied on the UI loop in resolution order

use crate::lifecycle::{CommandReply, LifecycleApi, LifecycleError, StatusReport};
use crate::models::{ViewerState, VmStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Result of a background request, delivered back to the widget.
#[derive(Debug)]
pub enum ViewerUpdate {
    Polled(Result<StatusReport, LifecycleError>),
    Started(Result<CommandReply, LifecycleError>),
    Stopped(Result<CommandReply, LifecycleError>),
}

/// Recurring status fetch. The task is aborted when the timer is dropped.
pub struct PollTimer {
    handle: Option<JoinHandle<()>>,
}

impl PollTimer {
    pub fn spawn(
        period: Duration,
        api: Arc<dyn LifecycleApi>,
        updates: mpsc::UnboundedSender<ViewerUpdate>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // First tick completes immediately
                ticker.tick().await;
                if updates.is_closed() {
                    break;
                }
                // Each tick gets its own request; a slow poll does not hold back the next one
                spawn_status_fetch(Arc::clone(&api), updates.clone());
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn spawn_status_fetch(api: Arc<dyn LifecycleApi>, updates: mpsc::UnboundedSender<ViewerUpdate>) {
    tokio::spawn(async move {
        let result = api.status().await;
        let _ = updates.send(ViewerUpdate::Polled(result));
    });
}

pub struct ViewerWidget {
    state: ViewerState,
    api: Arc<dyn LifecycleApi>,
    updates_tx: mpsc::UnboundedSender<ViewerUpdate>,
    updates_rx: mpsc::UnboundedReceiver<ViewerUpdate>,
    poll_timer: Option<PollTimer>,
}

impl ViewerWidget {
    pub fn new(api: Arc<dyn LifecycleApi>, refresh_interval: Duration, display_url: impl Into<String>) -> Self {
        let refresh_interval_ms = u64::try_from(refresh_interval.as_millis()).unwrap_or(u64::MAX);
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        Self {
            state: ViewerState::new(refresh_interval_ms, display_url),
            api,
            updates_tx,
            updates_rx,
            poll_timer: None,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn status(&self) -> VmStatus {
        self.state.status
    }

    pub fn is_attached(&self) -> bool {
        self.poll_timer.is_some()
    }

    /// Fetch status now and then every refresh interval until detached.
    pub fn attach(&mut self) {
        if self.is_attached() {
            debug!("Viewer already attached, ignoring");
            return;
        }

        // tokio::time::interval panics on a zero period
        let period = Duration::from_millis(self.state.refresh_interval_ms.max(1));
        info!("Attaching viewer, polling status every {:?}", period);
        self.poll_timer = Some(PollTimer::spawn(
            period,
            Arc::clone(&self.api),
            self.updates_tx.clone(),
        ));
    }

    pub fn detach(&mut self) {
        if let Some(mut timer) = self.poll_timer.take() {
            info!("Detaching viewer, status polling stopped");
            timer.cancel();
        }
    }

    pub fn refresh_status(&self) {
        spawn_status_fetch(Arc::clone(&self.api), self.updates_tx.clone());
    }

    pub fn start(&mut self) {
        info!("Starting computer use VM");
        self.state.begin_start();
        let api = Arc::clone(&self.api);
        let updates = self.updates_tx.clone();
        tokio::spawn(async move {
            let result = api.start().await;
            let _ = updates.send(ViewerUpdate::Started(result));
        });
    }

    pub fn stop(&mut self) {
        info!("Stopping computer use VM");
        self.state.begin_stop();
        let api = Arc::clone(&self.api);
        let updates = self.updates_tx.clone();
        tokio::spawn(async move {
            let result = api.stop().await;
            let _ = updates.send(ViewerUpdate::Stopped(result));
        });
    }

    pub fn toggle_fullscreen(&mut self) {
        self.state.toggle_fullscreen();
    }

    pub fn apply(&mut self, update: ViewerUpdate) {
        if !self.is_attached() {
            debug!("Discarding {:?} received while detached", update);
            return;
        }

        let before = self.state.status;
        match update {
            ViewerUpdate::Polled(result) => self.state.apply_status_report(result),
            ViewerUpdate::Started(result) => self.state.apply_start_reply(result),
            ViewerUpdate::Stopped(result) => self.state.apply_stop_reply(result),
        }
        if before != self.state.status {
            debug!("VM status {} -> {}", before, self.state.status);
        }
    }

    /// Apply every update that has already resolved without waiting. Returns how many were applied.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.updates_rx.try_recv() {
            self.apply(update);
            applied += 1;
        }
        applied
    }

    /// Wait for the next request to resolve and apply it.
    pub async fn next_update(&mut self) {
        // The widget holds a sender, so the channel never closes while it is alive
        if let Some(update) = self.updates_rx.recv().await {
            self.apply(update);
        }
    }
}

impl Drop for ViewerWidget {
    fn drop(&mut self) {
        self.detach();
    }
}
