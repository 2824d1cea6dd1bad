//! Status bar
//!
//! Displays the service address, its reachability and key hints.

use neurozip_app::{App, ServiceStatus};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const HINTS: &str = " | Tab: pane  F2/F3 Ctrl+T: mode  F5 Ctrl+R: run  Esc Ctrl+Q: quit";

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let service = match app.service() {
        ServiceStatus::Unknown => Span::styled("Service: unknown", Style::default().fg(Color::Gray)),
        ServiceStatus::Checking => {
            Span::styled("Service: checking...", Style::default().fg(Color::Yellow))
        },
        ServiceStatus::Online => Span::styled(
            "Service: online",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        ServiceStatus::Offline { reason } => {
            Span::styled(format!("Service: offline ({reason})"), Style::default().fg(Color::Red))
        },
    };

    let tail = app
        .status_message()
        .map_or_else(|| HINTS.to_owned(), |message| format!(" | {message}"));

    let status_line = Line::from(vec![
        Span::raw(" "),
        Span::raw(app.server_addr().to_owned()),
        Span::raw(" | "),
        service,
        Span::styled(tail, Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
