// ABOUTME: Main application structure and state management for the TUI

pub mod events;
pub mod notification;
pub mod state;
pub mod viewer;

pub use events::{AppEvent, EventHandler};
pub use notification::{Notification, NotificationType};
pub use state::{App, AppState};
pub use viewer::{PollTimer, ViewerUpdate, ViewerWidget};
