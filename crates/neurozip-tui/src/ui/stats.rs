//! Statistics panel
//!
//! Four labelled lines for the last successful run. Draws nothing without
//! one.

use neurozip_app::Stats;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Rows needed: four lines plus borders.
pub const HEIGHT: u16 = 6;

/// Render the statistics panel.
pub fn render(frame: &mut Frame, stats: Option<&Stats>, area: Rect) {
    let Some(stats) = stats else {
        return;
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let row = |label: &'static str, value: String| {
        Line::from(vec![Span::styled(label, bold), Span::raw(value)])
    };

    let lines = vec![
        row("Input size:", format!(" {} bytes", stats.input_size)),
        row("Output size:", format!(" {} bytes", stats.output_size)),
        row("Ratio:", format!(" {}", stats.ratio_text())),
        row("Time:", format!(" {} ms", stats.time_ms_text())),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Stats ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
