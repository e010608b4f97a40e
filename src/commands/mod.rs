// ABOUTME: Command handler registry consumed by the host chat/command dispatcher

pub mod registry;

pub use registry::{
    register_viewer_commands, Acknowledgment, CommandError, CommandHandler, CommandPayload,
    CommandRegistry, COMPUTER_SCREENSHOT, COMPUTER_START,
};
