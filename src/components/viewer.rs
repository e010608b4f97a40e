// ABOUTME: Viewer panel rendering the VM status toolbar and either the remote display or a status message

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::models::{ViewerBody, ViewerState, VmStatus};

pub struct ViewerComponent;

impl ViewerComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, viewer: &ViewerState) {
        let border_color = if viewer.fullscreen { Color::Green } else { Color::Cyan };
        let outer = Block::default()
            .title("Computer Use")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Toolbar
                Constraint::Min(0),    // Screen
            ])
            .split(inner);

        self.render_toolbar(frame, chunks[0], viewer);

        match viewer.body() {
            ViewerBody::RemoteDisplay { url } => self.render_remote_display(frame, chunks[1], url, viewer),
            ViewerBody::Message(message) => self.render_message(frame, chunks[1], message, viewer),
        }
    }

    fn render_toolbar(&self, frame: &mut Frame, area: Rect, viewer: &ViewerState) {
        let controls = format!(
            "[s] {}  [f] {}",
            viewer.primary_control().label(),
            viewer.fullscreen_label()
        );
        let controls_width = u16::try_from(controls.chars().count()).unwrap_or(u16::MAX);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(controls_width)])
            .split(area);

        let status_line = Line::from(vec![
            Span::raw("Computer Use Status: "),
            Span::styled(
                format!("{} {}", viewer.status.indicator(), viewer.status),
                Style::default()
                    .fg(status_color(viewer.status))
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(status_line), chunks[0]);

        let controls = Paragraph::new(controls)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Right);
        frame.render_widget(controls, chunks[1]);
    }

    fn render_remote_display(&self, frame: &mut Frame, area: Rect, url: &str, viewer: &ViewerState) {
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("noVNC viewer: ", Style::default().fg(Color::Gray)),
                Span::styled(url.to_string(), Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)),
            ]),
            Line::from(""),
            Line::from("Open the address above in a browser to view and control the VM desktop."),
        ];
        if let Some(detail) = &viewer.diagnostic {
            lines.push(Line::from(""));
            lines.push(Line::styled(detail.clone(), Style::default().fg(Color::Yellow)));
        }

        let display = Paragraph::new(lines)
            .block(
                Block::default()
                    .title("Remote Display")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(display, area);
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, message: &str, viewer: &ViewerState) {
        let mut lines = vec![
            Line::from(""),
            Line::styled(message.to_string(), Style::default().fg(Color::Gray)),
        ];
        if let Some(detail) = &viewer.diagnostic {
            lines.push(Line::from(""));
            lines.push(Line::styled(detail.clone(), Style::default().fg(Color::Red)));
        }

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }
}

fn status_color(status: VmStatus) -> Color {
    match status {
        VmStatus::Running => Color::Green,
        VmStatus::Starting | VmStatus::Stopping => Color::Yellow,
        VmStatus::Stopped | VmStatus::Unknown => Color::Gray,
        VmStatus::Error => Color::Red,
    }
}

impl Default for ViewerComponent {
    fn default() -> Self {
        Self::new()
    }
}
