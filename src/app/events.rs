// ABOUTME: Event handling system for keyboard input and viewer actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::app::{App, AppState};
use crate::models::{Control, ViewerState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    PrimaryAction,      // Start or Stop, whichever control is shown
    RefreshStatus,
    ToggleFullscreen,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &AppState, viewer: &ViewerState) -> Option<AppEvent> {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppEvent::Quit);
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Char('q') => Some(AppEvent::Quit),
            // Esc backs out of fullscreen before it quits
            KeyCode::Esc if viewer.fullscreen => Some(AppEvent::ToggleFullscreen),
            KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Char('s') | KeyCode::Enter => Some(AppEvent::PrimaryAction),
            KeyCode::Char('r') => Some(AppEvent::RefreshStatus),
            KeyCode::Char('f') => Some(AppEvent::ToggleFullscreen),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, app: &mut App) {
        match event {
            AppEvent::Quit => app.state.quit(),
            AppEvent::ToggleHelp => app.state.toggle_help(),
            AppEvent::PrimaryAction => match app.viewer.state().primary_control() {
                Control::Start => app.viewer.start(),
                Control::Stop => app.viewer.stop(),
            },
            AppEvent::RefreshStatus => app.viewer.refresh_status(),
            AppEvent::ToggleFullscreen => app.viewer.toggle_fullscreen(),
        }
    }
}
