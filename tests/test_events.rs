// ABOUTME: Unit tests for event handling to ensure keyboard inputs map to correct viewer actions

use computer_use_viewer::app::{AppEvent, AppState, EventHandler};
use computer_use_viewer::models::{ViewerState, VmStatus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const DISPLAY_URL: &str = "http://localhost:6080/vnc.html?autoconnect=true";

fn create_key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn create_key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn viewer() -> ViewerState {
    ViewerState::new(2000, DISPLAY_URL)
}

#[test]
fn test_quit_key_events() {
    let state = AppState::default();
    let viewer = viewer();

    let quit_event1 = EventHandler::handle_key_event(create_key_event(KeyCode::Char('q')), &state, &viewer);
    assert_eq!(quit_event1, Some(AppEvent::Quit));

    let quit_event2 = EventHandler::handle_key_event(create_key_event(KeyCode::Esc), &state, &viewer);
    assert_eq!(quit_event2, Some(AppEvent::Quit));

    let quit_event3 = EventHandler::handle_key_event(
        create_key_event_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL),
        &state,
        &viewer,
    );
    assert_eq!(quit_event3, Some(AppEvent::Quit));
}

#[test]
fn test_action_key_events() {
    let state = AppState::default();
    let viewer = viewer();

    let start_stop = EventHandler::handle_key_event(create_key_event(KeyCode::Char('s')), &state, &viewer);
    assert_eq!(start_stop, Some(AppEvent::PrimaryAction));

    let enter = EventHandler::handle_key_event(create_key_event(KeyCode::Enter), &state, &viewer);
    assert_eq!(enter, Some(AppEvent::PrimaryAction));

    let refresh = EventHandler::handle_key_event(create_key_event(KeyCode::Char('r')), &state, &viewer);
    assert_eq!(refresh, Some(AppEvent::RefreshStatus));

    let fullscreen = EventHandler::handle_key_event(create_key_event(KeyCode::Char('f')), &state, &viewer);
    assert_eq!(fullscreen, Some(AppEvent::ToggleFullscreen));
}

#[test]
fn test_esc_leaves_fullscreen_before_quitting() {
    let state = AppState::default();
    let mut viewer = viewer();
    viewer.status = VmStatus::Running;
    viewer.toggle_fullscreen();

    let esc = EventHandler::handle_key_event(create_key_event(KeyCode::Esc), &state, &viewer);
    assert_eq!(esc, Some(AppEvent::ToggleFullscreen));

    // q still quits straight away
    let quit = EventHandler::handle_key_event(create_key_event(KeyCode::Char('q')), &state, &viewer);
    assert_eq!(quit, Some(AppEvent::Quit));
}

#[test]
fn test_help_visible_only_responds_to_help_and_esc() {
    let state = AppState {
        help_visible: true,
        ..AppState::default()
    };
    let viewer = viewer();

    let help_event = EventHandler::handle_key_event(create_key_event(KeyCode::Char('?')), &state, &viewer);
    assert_eq!(help_event, Some(AppEvent::ToggleHelp));

    let esc_event = EventHandler::handle_key_event(create_key_event(KeyCode::Esc), &state, &viewer);
    assert_eq!(esc_event, Some(AppEvent::ToggleHelp));

    let other_event = EventHandler::handle_key_event(create_key_event(KeyCode::Char('s')), &state, &viewer);
    assert!(other_event.is_none());
}

#[test]
fn test_unknown_key_returns_none() {
    let state = AppState::default();
    let viewer = viewer();

    let unknown_event = EventHandler::handle_key_event(create_key_event(KeyCode::Char('x')), &state, &viewer);
    assert!(unknown_event.is_none());

    let unknown_f_key = EventHandler::handle_key_event(create_key_event(KeyCode::F(1)), &state, &viewer);
    assert!(unknown_f_key.is_none());
}

#[test]
fn test_state_quit_and_help_toggle() {
    let mut state = AppState::default();

    assert!(!state.should_quit);
    state.toggle_help();
    assert!(state.help_visible);
    state.quit();
    assert!(state.should_quit);
}
