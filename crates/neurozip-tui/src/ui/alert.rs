//! Alert
//!
//! Modal popup for failed runs.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const MAX_WIDTH: u16 = 60;
const HEIGHT: u16 = 7;

/// Render `message` centred over `area`.
pub fn render(frame: &mut Frame, message: &str, area: Rect) {
    let width = MAX_WIDTH.min(area.width);
    let height = HEIGHT.min(area.height);
    let popup = Rect {
        x: area.x.saturating_add(area.width.saturating_sub(width) / 2),
        y: area.y.saturating_add(area.height.saturating_sub(height) / 2),
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Error ");

    let lines = vec![
        Line::from(message.to_owned()),
        Line::from(""),
        Line::from("Press Enter to dismiss").style(Style::default().fg(Color::DarkGray)),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}
