//! Mode bar
//!
//! Mode selector and run control.

use neurozip_app::{App, Mode};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Render the mode bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mode_span = |label: &'static str, mode: Mode| {
        if app.mode() == mode {
            Span::styled(
                label,
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(Color::Gray))
        }
    };

    let run = if app.is_busy() {
        let frame_idx = app.spinner() % SPINNER.len();
        Span::styled(
            format!(" Working... {} ", SPINNER[frame_idx]),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled(" [F5] Run ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    };

    let line = Line::from(vec![
        Span::raw(" "),
        mode_span(" [F2] Compress ", Mode::Compress),
        Span::raw(" "),
        mode_span(" [F3] Decompress ", Mode::Decompress),
        Span::raw("   "),
        run,
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
