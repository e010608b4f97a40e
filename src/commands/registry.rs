// ABOUTME: Named command handlers mapping dispatcher payloads to renderable acknowledgments
// The registry is built once at startup and owned by the application for the process lifetime

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

pub const COMPUTER_START: &str = "computer_start";
pub const COMPUTER_SCREENSHOT: &str = "computer_screenshot";

const START_ACKNOWLEDGMENT: &str =
    "Computer Use VM started. Use the viewer to interact or issue computer use commands.";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No handler registered for command: {0}")]
    UnknownCommand(String),

    #[error("Invalid command payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Payload delivered by the dispatcher. Only `event` is interpreted; the rest is kept as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandPayload {
    pub event: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CommandPayload {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            fields: Map::new(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, CommandError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Renderable fragment returned by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgment {
    pub text: String,
}

impl Acknowledgment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

pub type CommandHandler = Box<dyn Fn(&CommandPayload) -> Option<Acknowledgment> + Send + Sync>;

#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, CommandHandler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous handler with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&CommandPayload) -> Option<Acknowledgment> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("Registering command handler: {}", name);
        self.handlers.insert(name, Box::new(handler));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn dispatch(
        &self,
        name: &str,
        payload: &CommandPayload,
    ) -> Result<Option<Acknowledgment>, CommandError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
        Ok(handler(payload))
    }

    pub fn dispatch_json(
        &self,
        name: &str,
        raw_payload: &str,
    ) -> Result<Option<Acknowledgment>, CommandError> {
        let payload = CommandPayload::from_json(raw_payload)?;
        self.dispatch(name, &payload)
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("CommandRegistry").field("handlers", &names).finish()
    }
}

pub fn register_viewer_commands(registry: &mut CommandRegistry) {
    registry.register(COMPUTER_START, |payload| {
        (payload.event == "result").then(|| Acknowledgment::new(START_ACKNOWLEDGMENT))
    });

    // Screenshots reach the chat through the host's image message path
    registry.register(COMPUTER_SCREENSHOT, |_| None);
}
