//! Observable session state types.
//!
//! This module defines the values the [`crate::App`] exposes to renderers:
//! editable [`TextBuffer`]s, the [`Stats`] record of the last successful run,
//! and the [`RequestToken`] bookkeeping that decides which completion is
//! current.

use std::{fmt, time::Duration};

use neurozip_client::Mode;

/// Which pane receives keyboard edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Text sent to the service.
    #[default]
    Input,
    /// Payload returned by the service.
    Output,
}

impl Focus {
    /// The other pane.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Input => Self::Output,
            Self::Output => Self::Input,
        }
    }
}

/// Identifier of one dispatched run.
///
/// Tokens increase by one per run; only the latest one is ever applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

impl RequestToken {
    /// The token issued after this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The run currently awaiting its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    /// Token the completion must carry.
    pub token: RequestToken,
    /// Mode at dispatch time. Decides the ratio direction.
    pub mode: Mode,
    /// Input size in characters at dispatch time.
    pub input_size: usize,
}

/// Reachability of the service, from the startup probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ServiceStatus {
    /// No probe has been sent.
    #[default]
    Unknown,
    /// Probe in flight.
    Checking,
    /// Service answered healthy.
    Online,
    /// Probe failed or the service reported a problem.
    Offline {
        /// Reason shown in the status bar.
        reason: String,
    },
}

/// Statistics of the last successful run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    /// Input size in characters.
    pub input_size: usize,
    /// Output size in characters.
    pub output_size: usize,
    /// `output / input` when compressing, `input / output` when
    /// decompressing. `None` when the denominator is zero.
    pub ratio: Option<f64>,
    /// Time from dispatch to completion.
    pub elapsed: Duration,
}

impl Stats {
    /// Derive the record for a finished run.
    pub fn compute(mode: Mode, input_size: usize, output_size: usize, elapsed: Duration) -> Self {
        let (numerator, denominator) = match mode {
            Mode::Compress => (output_size, input_size),
            Mode::Decompress => (input_size, output_size),
        };
        let ratio = (denominator != 0).then(|| numerator as f64 / denominator as f64);
        Self { input_size, output_size, ratio, elapsed }
    }

    /// Ratio to two decimals, `n/a` when undefined.
    pub fn ratio_text(&self) -> String {
        self.ratio.map_or_else(|| "n/a".to_owned(), |ratio| format!("{ratio:.2}"))
    }

    /// Elapsed milliseconds to one decimal.
    pub fn time_ms_text(&self) -> String {
        format!("{:.1}", self.elapsed.as_secs_f64() * 1000.0)
    }
}

/// Editable multi-line text with a cursor.
///
/// The cursor counts characters, not bytes, so it always sits on a char
/// boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the contents, leaving the cursor at the end.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_len();
    }

    /// Remove all text.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor = self.cursor.saturating_add(1);
    }

    /// Insert a string at the cursor, leaving the cursor after it.
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.text.insert_str(at, s);
        self.cursor = self.cursor.saturating_add(s.chars().count());
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.cursor.saturating_sub(1);
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    /// Move one character left.
    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move one character right.
    pub fn right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor = self.cursor.saturating_add(1);
        }
    }

    /// Move to the start of the current line.
    pub fn home(&mut self) {
        let (line, _) = self.cursor_line_col();
        self.cursor = self.line_starts().get(line).copied().unwrap_or(0);
    }

    /// Move to the end of the current line.
    pub fn end(&mut self) {
        let (line, _) = self.cursor_line_col();
        let starts = self.line_starts();
        if let Some(&start) = starts.get(line) {
            self.cursor = start.saturating_add(self.line_len(&starts, line));
        }
    }

    /// Move to the same column on the previous line, clamped to its length.
    pub fn up(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line == 0 {
            return;
        }
        self.move_to(line.saturating_sub(1), col);
    }

    /// Move to the same column on the next line, clamped to its length.
    pub fn down(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line.saturating_add(1) >= self.line_starts().len() {
            return;
        }
        self.move_to(line.saturating_add(1), col);
    }

    /// Cursor as (line, column), both zero-based, in characters.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let starts = self.line_starts();
        let line = starts.iter().rposition(|&start| start <= self.cursor).unwrap_or(0);
        let start = starts.get(line).copied().unwrap_or(0);
        (line, self.cursor.saturating_sub(start))
    }

    fn move_to(&mut self, line: usize, col: usize) {
        let starts = self.line_starts();
        if let Some(&start) = starts.get(line) {
            self.cursor = start.saturating_add(col.min(self.line_len(&starts, line)));
        }
    }

    /// Character offset where each line begins. Never empty.
    fn line_starts(&self) -> Vec<usize> {
        let mut starts = vec![0];
        for (idx, c) in self.text.chars().enumerate() {
            if c == '\n' {
                starts.push(idx.saturating_add(1));
            }
        }
        starts
    }

    /// Length of `line` in characters, excluding its newline.
    fn line_len(&self, starts: &[usize], line: usize) -> usize {
        let start = starts.get(line).copied().unwrap_or(0);
        starts.get(line.saturating_add(1)).map_or_else(
            || self.char_len().saturating_sub(start),
            |&next| next.saturating_sub(1).saturating_sub(start),
        )
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text.char_indices().nth(char_idx).map_or(self.text.len(), |(at, _)| at)
    }
}
