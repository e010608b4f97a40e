// ABOUTME: Application state, viewer wiring, and command handling for the TUI

use super::{Notification, ViewerWidget};
use crate::commands::{register_viewer_commands, Acknowledgment, CommandError, CommandRegistry};
use crate::config::AppConfig;
use crate::lifecycle::{HttpLifecycleClient, LifecycleApi};
use crate::models::VmStatus;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct AppState {
    pub should_quit: bool,
    pub help_visible: bool,
    pub notifications: Vec<Notification>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Drop expired notifications. Returns true if any were removed.
    pub fn prune_notifications(&mut self) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| !n.is_expired());
        before != self.notifications.len()
    }

    pub fn latest_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }
}

pub struct App {
    pub state: AppState,
    pub viewer: ViewerWidget,
    pub commands: CommandRegistry,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let api = HttpLifecycleClient::new(config.api_base_url.clone(), config.request_timeout());
        Self::with_api(Arc::new(api), config)
    }

    pub fn with_api(api: Arc<dyn LifecycleApi>, config: &AppConfig) -> Self {
        let mut commands = CommandRegistry::new();
        register_viewer_commands(&mut commands);

        Self {
            state: AppState::new(),
            viewer: ViewerWidget::new(api, config.refresh_interval(), config.display_url.clone()),
            commands,
        }
    }

    pub fn init(&mut self) {
        self.viewer.attach();
    }

    pub fn shutdown(&mut self) {
        self.viewer.detach();
    }

    /// Apply resolved requests and expire notifications. Returns true when a redraw is needed.
    pub fn tick(&mut self) -> bool {
        let before = self.viewer.status();
        let applied = self.viewer.apply_pending();
        let after = self.viewer.status();

        if before != after {
            self.announce_transition(before, after);
        }

        let pruned = self.state.prune_notifications();
        applied > 0 || pruned
    }

    fn announce_transition(&mut self, before: VmStatus, after: VmStatus) {
        match (before, after) {
            (_, VmStatus::Error) => {
                let detail = self
                    .viewer
                    .state()
                    .diagnostic
                    .clone()
                    .unwrap_or_else(|| "Computer use VM reported an error".to_string());
                self.state.notify(Notification::error(detail));
            }
            (VmStatus::Starting, VmStatus::Running) => {
                self.state.notify(Notification::success("Computer use VM is running"));
            }
            (VmStatus::Stopping, VmStatus::Stopped) => {
                self.state.notify(Notification::success("Computer use VM stopped"));
            }
            _ => {}
        }
    }

    /// Dispatch a host command and surface its acknowledgment on the notification line.
    pub fn handle_command(
        &mut self,
        name: &str,
        raw_payload: &str,
    ) -> Result<Option<Acknowledgment>, CommandError> {
        match self.commands.dispatch_json(name, raw_payload) {
            Ok(Some(ack)) => {
                info!("Command {} acknowledged", name);
                self.state.notify(Notification::info(ack.text.clone()));
                Ok(Some(ack))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                warn!("Command {} failed: {}", name, e);
                self.state.notify(Notification::warning(e.to_string()));
                Err(e)
            }
        }
    }
}
