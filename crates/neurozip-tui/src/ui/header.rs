//! Header
//!
//! Static branding line.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::Paragraph,
};

/// Title shown at the top of the screen.
pub const TITLE: &str = "NeuroZip - AI Compression Demo";

/// Render the header.
pub fn render(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(TITLE)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(paragraph, area);
}
