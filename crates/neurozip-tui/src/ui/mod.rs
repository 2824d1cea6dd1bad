//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod alert;
mod header;
mod mode_bar;
mod stats;
mod status;
mod text_area;

use neurozip_app::{Focus, Mode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::App;

const HEADER_HEIGHT: u16 = 1;
const MODE_BAR_HEIGHT: u16 = 1;
const PANES_MIN_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let stats_height = if app.stats().is_some() { stats::HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(MODE_BAR_HEIGHT),
            Constraint::Min(PANES_MIN_HEIGHT),
            Constraint::Length(stats_height),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [header_area, mode_area, panes_area, stats_area, status_area] = chunks.as_ref() else {
        return;
    };

    header::render(frame, *header_area);
    mode_bar::render(frame, app, *mode_area);
    render_panes(frame, app, *panes_area);
    stats::render(frame, app.stats(), *stats_area);
    status::render(frame, app, *status_area);

    if let Some(message) = app.alert() {
        let area = frame.area();
        alert::render(frame, message, area);
    }
}

/// Render input and output side by side.
fn render_panes(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let [input_area, output_area] = chunks.as_ref() else {
        return;
    };

    let placeholder = match app.mode() {
        Mode::Compress => "Enter text to compress...",
        Mode::Decompress => "Paste Base64 data to decompress...",
    };
    let editing = app.alert().is_none();

    text_area::render(frame, text_area::Pane {
        title: " Input ",
        buffer: app.input(),
        placeholder,
        focused: editing && app.focus() == Focus::Input,
    }, *input_area);
    text_area::render(frame, text_area::Pane {
        title: " Output ",
        buffer: app.output(),
        placeholder: "Output will appear here",
        focused: editing && app.focus() == Focus::Output,
    }, *output_area);
}
