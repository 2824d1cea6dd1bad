//! Text area
//!
//! Bordered, scrollable view of a [`TextBuffer`] with a placeholder and a
//! cursor when focused.

use neurozip_app::TextBuffer;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

const BORDER_SIZE: u16 = 1;
const TAB: &str = "    ";

/// What to draw in one pane.
pub struct Pane<'a> {
    /// Border title.
    pub title: &'a str,
    /// Pane contents.
    pub buffer: &'a TextBuffer,
    /// Shown dimmed while the buffer is empty.
    pub placeholder: &'a str,
    /// Highlight the border and place the cursor.
    pub focused: bool,
}

/// Render a text pane.
pub fn render(frame: &mut Frame, pane: Pane<'_>, area: Rect) {
    let border_style = if pane.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style).title(pane.title);

    let inner_width = area.width.saturating_sub(2 * BORDER_SIZE);
    let inner_height = area.height.saturating_sub(2 * BORDER_SIZE);

    let (line, col) = pane.buffer.cursor_line_col();
    let col = cursor_column(pane.buffer.text(), line, col);
    let line = u16::try_from(line).unwrap_or(u16::MAX);

    // Keep the cursor inside the visible window.
    let scroll_y = line.saturating_sub(inner_height.saturating_sub(1));
    let scroll_x = col.saturating_sub(inner_width.saturating_sub(1));

    let paragraph = if pane.buffer.is_empty() {
        Paragraph::new(pane.placeholder).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(pane.buffer.text().replace('\t', TAB)).scroll((scroll_y, scroll_x))
    };

    frame.render_widget(paragraph.block(block), area);

    if pane.focused && inner_width > 0 && inner_height > 0 {
        let x = area.x.saturating_add(BORDER_SIZE).saturating_add(col - scroll_x);
        let y = area.y.saturating_add(BORDER_SIZE).saturating_add(line - scroll_y);
        frame.set_cursor_position((x, y));
    }
}

/// Display column of the cursor: the rendered width of the line before it.
fn cursor_column(text: &str, line: usize, col: usize) -> u16 {
    let prefix: String = text.split('\n').nth(line).unwrap_or_default().chars().take(col).collect();
    let width = Span::raw(prefix.replace('\t', TAB)).width();
    u16::try_from(width).unwrap_or(u16::MAX)
}
