// ABOUTME: Error types for Lifecycle API calls
// Both variants are recoverable and collapse to the error status in the viewer

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The request never produced a response (connect failure, timeout, IO).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but was not usable (non-2xx status or unparseable body).
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl LifecycleError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for LifecycleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() || err.is_status() {
            Self::Protocol(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
