// ABOUTME: Viewer data model holding the VM status, layout mode, and status-driven rendering policy

use crate::lifecycle::{CommandReply, LifecycleError, StatusReport};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VmStatus {
    #[default]
    Unknown,
    Starting,
    Running,
    Stopping,
    Stopped,
    Error,
}

impl VmStatus {
    /// Map a server-reported status string onto the statuses the viewer renders.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "unknown" => Self::Unknown,
            "starting" => Self::Starting,
            "running" => Self::Running,
            "stopping" => Self::Stopping,
            // No container yet; starting one is the next step either way
            "stopped" | "not_created" => Self::Stopped,
            "error" | "docker_error" => Self::Error,
            other => {
                warn!("Unrecognized VM status '{}', treating as unknown", other);
                Self::Unknown
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Error => "error",
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            Self::Running => "●",
            Self::Starting | Self::Stopping => "◐",
            Self::Stopped => "⏸",
            Self::Error => "✗",
            Self::Unknown => "?",
        }
    }

    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for VmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single control shown next to the status, chosen by status alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Stop,
}

impl Control {
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Stop => "Stop",
        }
    }
}

/// What fills the screen area of the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerBody<'a> {
    RemoteDisplay { url: &'a str },
    Message(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    pub status: VmStatus,
    pub fullscreen: bool,
    pub refresh_interval_ms: u64,
    pub display_url: String,
    /// Text of the last failure or server-supplied message, cleared by the next clean report.
    pub diagnostic: Option<String>,
}

impl ViewerState {
    pub fn new(refresh_interval_ms: u64, display_url: impl Into<String>) -> Self {
        Self {
            status: VmStatus::Unknown,
            fullscreen: false,
            refresh_interval_ms,
            display_url: display_url.into(),
            diagnostic: None,
        }
    }

    pub fn begin_start(&mut self) {
        self.status = VmStatus::Starting;
    }

    pub fn begin_stop(&mut self) {
        self.status = VmStatus::Stopping;
    }

    /// Poll results are authoritative and overwrite whatever the viewer assumed.
    pub fn apply_status_report(&mut self, result: Result<StatusReport, LifecycleError>) {
        match result {
            Ok(report) => {
                self.status = VmStatus::from_wire(&report.status);
                self.diagnostic = report.message;
            }
            Err(e) => {
                error!("Failed to check container status: {}", e);
                self.fail(e.to_string());
            }
        }
    }

    pub fn apply_start_reply(&mut self, result: Result<CommandReply, LifecycleError>) {
        self.apply_command_reply("start", VmStatus::Running, result);
    }

    pub fn apply_stop_reply(&mut self, result: Result<CommandReply, LifecycleError>) {
        self.apply_command_reply("stop", VmStatus::Stopped, result);
    }

    fn apply_command_reply(
        &mut self,
        action: &str,
        success: VmStatus,
        result: Result<CommandReply, LifecycleError>,
    ) {
        match result {
            Ok(reply) if reply.is_ok() => {
                self.status = success;
                self.diagnostic = None;
            }
            Ok(reply) => {
                warn!("Failed to {} container: server replied '{}'", action, reply.status);
                let detail = reply
                    .message
                    .unwrap_or_else(|| format!("{action} failed: {}", reply.status));
                self.fail(detail);
            }
            Err(e) => {
                error!("Failed to {} container: {}", action, e);
                self.fail(e.to_string());
            }
        }
    }

    fn fail(&mut self, diagnostic: String) {
        self.status = VmStatus::Error;
        self.diagnostic = Some(diagnostic);
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn primary_control(&self) -> Control {
        if self.status.is_running() {
            Control::Stop
        } else {
            Control::Start
        }
    }

    pub fn fullscreen_label(&self) -> &'static str {
        if self.fullscreen {
            "Exit Fullscreen"
        } else {
            "Fullscreen"
        }
    }

    pub fn body(&self) -> ViewerBody<'_> {
        let message = match self.status {
            VmStatus::Running => {
                return ViewerBody::RemoteDisplay {
                    url: &self.display_url,
                }
            }
            VmStatus::Starting => "Starting computer use container...",
            VmStatus::Stopping => "Stopping computer use container...",
            VmStatus::Stopped => "Container stopped. Press [s] to launch the computer use VM.",
            VmStatus::Error => {
                "Computer use VM error. Press [s] to start it again or wait for the next status check."
            }
            VmStatus::Unknown => "Container not running. Press [s] to launch the computer use VM.",
        };
        ViewerBody::Message(message)
    }
}
