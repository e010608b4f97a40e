// ABOUTME: Short-lived messages shown on the notification line
// Carries command acknowledgments and lifecycle outcomes; each expires after its time-to-live

use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationType,
    expires_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationType) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: Instant::now() + DEFAULT_TTL,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Warning)
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.expires_at = Instant::now() + ttl;
        self
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}
