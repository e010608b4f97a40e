// ABOUTME: Main layout component arranging title, viewer panel, notification line, and bottom menu bar

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
    style::{Color, Modifier, Style},
};

use crate::app::{AppState, NotificationType};
use crate::models::ViewerState;
use super::{HelpComponent, ViewerComponent};

pub const MENU_TEXT: &str = "[s]tart/stop [r]efresh [f]ullscreen [?]help [q]uit";

pub struct LayoutComponent {
    viewer: ViewerComponent,
    help: HelpComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            viewer: ViewerComponent::new(),
            help: HelpComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState, viewer: &ViewerState) {
        let area = frame.size();

        // Fullscreen hands the whole terminal to the viewer
        if viewer.fullscreen {
            self.viewer.render(frame, area, viewer);
        } else {
            let main_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),  // Title
                    Constraint::Min(0),     // Viewer
                    Constraint::Length(1),  // Notification line
                    Constraint::Length(3),  // Bottom menu bar
                ])
                .split(area);

            self.render_title(frame, main_chunks[0]);
            self.viewer.render(frame, main_chunks[1], viewer);
            self.render_notification(frame, main_chunks[2], state);
            self.render_menu_bar(frame, main_chunks[3]);
        }

        if state.help_visible {
            self.help.render(frame, area);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new("Computer Use Viewer")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(title, area);
    }

    fn render_notification(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(notification) = state.latest_notification() else {
            return;
        };

        let color = match notification.kind {
            NotificationType::Success => Color::Green,
            NotificationType::Error => Color::Red,
            NotificationType::Info => Color::Cyan,
            NotificationType::Warning => Color::Yellow,
        };
        let line = Paragraph::new(notification.message.as_str())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center);
        frame.render_widget(line, area);
    }

    fn render_menu_bar(&self, frame: &mut Frame, area: Rect) {
        let menu = Paragraph::new(MENU_TEXT)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
            )
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);

        frame.render_widget(menu, area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
