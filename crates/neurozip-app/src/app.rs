//! Application state machine.
//!
//! This module defines the [`App`] state machine, which owns the session
//! state of the client completely decoupled from I/O and the transport.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Holds the input and output panes, the mode and the busy flag.
//! - Issues a [`RequestToken`] per run and applies only the latest
//!   completion.
//! - Derives the [`Stats`] record of a successful run.
//! - Keeps a blocking notification for failed runs until it is dismissed.

use std::time::Duration;

use neurozip_client::Mode;

use crate::{
    AppAction, AppEvent, Focus, InFlight, KeyInput, RequestToken, ServiceStatus, Stats, TextBuffer,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Service base address, for display.
    server_addr: String,
    /// Text sent to the service.
    input: TextBuffer,
    /// Payload returned by the service.
    output: TextBuffer,
    /// Current operation selector.
    mode: Mode,
    /// Pane receiving edits.
    focus: Focus,
    /// Run awaiting its completion. `Some` exactly while busy.
    in_flight: Option<InFlight>,
    /// Latest token issued.
    last_token: RequestToken,
    /// Statistics of the last successful run. `None` until one succeeds.
    stats: Option<Stats>,
    /// Blocking notification. Input is ignored until it is dismissed.
    alert: Option<String>,
    /// Result of the service probe.
    service: ServiceStatus,
    /// Spinner frame, advanced on ticks while busy.
    spinner: usize,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App with empty panes in compress mode.
    pub fn new(server_addr: String) -> Self {
        Self {
            server_addr,
            input: TextBuffer::new(),
            output: TextBuffer::new(),
            mode: Mode::Compress,
            focus: Focus::Input,
            in_flight: None,
            last_token: RequestToken::default(),
            stats: None,
            alert: None,
            service: ServiceStatus::Unknown,
            spinner: 0,
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Paste(text) => {
                if self.alert.is_some() {
                    return vec![];
                }
                self.edit(|buf| buf.insert_str(&text))
            },
            AppEvent::Tick => {
                if self.is_busy() {
                    self.spinner = self.spinner.wrapping_add(1);
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Completed { token, result, elapsed } => self.complete(token, result, elapsed),
            AppEvent::Service(status) => {
                self.service = status;
                vec![AppAction::Render]
            },
        }
    }

    /// Handle keyboard input.
    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if self.alert.is_some() {
            return match key {
                KeyInput::Enter | KeyInput::Esc => self.dismiss_alert(),
                _ => vec![],
            };
        }

        match key {
            KeyInput::Esc | KeyInput::Ctrl('q' | 'c') => self.quit(),
            KeyInput::F(2) => self.set_mode(Mode::Compress),
            KeyInput::F(3) => self.set_mode(Mode::Decompress),
            KeyInput::Ctrl('t') => self.toggle_mode(),
            KeyInput::F(5) | KeyInput::Ctrl('r') => {
                if self.is_busy() {
                    self.status_message = Some("Still working on the previous request".into());
                    vec![AppAction::Render]
                } else {
                    self.run()
                }
            },
            KeyInput::Tab => {
                self.focus = self.focus.toggled();
                vec![AppAction::Render]
            },
            KeyInput::F(_) | KeyInput::Ctrl(_) => vec![],
            KeyInput::Char(c) => self.edit(|buf| buf.insert(c)),
            KeyInput::Enter => self.edit(|buf| buf.insert('\n')),
            KeyInput::Backspace => self.edit(TextBuffer::backspace),
            KeyInput::Delete => self.edit(TextBuffer::delete),
            KeyInput::Left => self.edit(TextBuffer::left),
            KeyInput::Right => self.edit(TextBuffer::right),
            KeyInput::Up => self.edit(TextBuffer::up),
            KeyInput::Down => self.edit(TextBuffer::down),
            KeyInput::Home => self.edit(TextBuffer::home),
            KeyInput::End => self.edit(TextBuffer::end),
        }
    }

    /// Apply an edit to the focused pane.
    fn edit(&mut self, op: impl FnOnce(&mut TextBuffer)) -> Vec<AppAction> {
        match self.focus {
            Focus::Input => op(&mut self.input),
            Focus::Output => op(&mut self.output),
        }
        vec![AppAction::Render]
    }

    /// Apply a completion if it belongs to the latest run.
    fn complete(
        &mut self,
        token: RequestToken,
        result: Result<String, String>,
        elapsed: Duration,
    ) -> Vec<AppAction> {
        let Some(in_flight) = self.in_flight.filter(|run| run.token == token) else {
            tracing::debug!(%token, latest = %self.last_token, "discarding stale completion");
            return vec![];
        };
        self.in_flight = None;
        self.status_message = None;

        match result {
            Ok(payload) => {
                let output_size = payload.chars().count();
                self.stats =
                    Some(Stats::compute(in_flight.mode, in_flight.input_size, output_size, elapsed));
                self.output.set(payload);
            },
            Err(message) => {
                self.output.clear();
                self.alert = Some(format!("Error: {message}"));
            },
        }
        vec![AppAction::Render]
    }

    /// Start a run of the current mode over the current input.
    ///
    /// Clears output and statistics, marks the session busy and issues a new
    /// token. A run already in flight is superseded: its completion will be
    /// discarded.
    pub fn run(&mut self) -> Vec<AppAction> {
        self.output.clear();
        self.stats = None;
        self.alert = None;
        self.status_message = None;
        self.spinner = 0;

        self.last_token = self.last_token.next();
        let token = self.last_token;
        let input = self.input.text().to_owned();
        self.in_flight = Some(InFlight { token, mode: self.mode, input_size: input.chars().count() });

        vec![AppAction::Dispatch { token, request: self.mode.request(input) }, AppAction::Render]
    }

    /// Select the operation. Panes and statistics are left untouched.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<AppAction> {
        self.mode = mode;
        vec![AppAction::Render]
    }

    /// Flip between compress and decompress.
    pub fn toggle_mode(&mut self) -> Vec<AppAction> {
        self.set_mode(self.mode.toggled())
    }

    /// Replace the input pane (paste).
    pub fn set_input(&mut self, text: impl Into<String>) -> Vec<AppAction> {
        self.input.set(text);
        vec![AppAction::Render]
    }

    /// Replace the output pane.
    pub fn set_output(&mut self, text: impl Into<String>) -> Vec<AppAction> {
        self.output.set(text);
        vec![AppAction::Render]
    }

    /// Close the notification.
    pub fn dismiss_alert(&mut self) -> Vec<AppAction> {
        self.alert = None;
        vec![AppAction::Render]
    }

    /// Probe the service for the status bar.
    pub fn probe_service(&mut self) -> Vec<AppAction> {
        self.service = ServiceStatus::Checking;
        vec![AppAction::ProbeService, AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Service base address.
    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    /// Input pane.
    pub fn input(&self) -> &TextBuffer {
        &self.input
    }

    /// Output pane.
    pub fn output(&self) -> &TextBuffer {
        &self.output
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Focused pane.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Whether a run is awaiting its completion.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Run awaiting its completion. `None` when idle.
    pub fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    /// Latest token issued. The default token before the first run.
    pub fn last_token(&self) -> RequestToken {
        self.last_token
    }

    /// Statistics of the last successful run. `None` if absent.
    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    /// Pending notification. `None` if no notification.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Service reachability.
    pub fn service(&self) -> &ServiceStatus {
        &self.service
    }

    /// Spinner frame counter.
    pub fn spinner(&self) -> usize {
        self.spinner
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use neurozip_client::Request;

    use super::*;

    fn app_with_input(text: &str) -> App {
        let mut app = App::new("http://localhost:5000".into());
        let _ = app.set_input(text);
        app
    }

    fn dispatched_token(actions: &[AppAction]) -> RequestToken {
        match actions.first() {
            Some(AppAction::Dispatch { token, .. }) => *token,
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn run_clears_output_and_dispatches() {
        let mut app = app_with_input("hello world");
        let _ = app.set_output("stale");

        let actions = app.run();

        assert!(matches!(actions.as_slice(), [
            AppAction::Dispatch { request: Request::Compress { .. }, .. },
            AppAction::Render
        ]));
        assert!(app.output.is_empty());
        assert!(app.is_busy());
        assert!(app.stats.is_none());
    }

    #[test]
    fn compress_success_fills_output_and_stats() {
        let mut app = app_with_input("hello world");
        let token = dispatched_token(&app.run());

        let _ = app.handle(AppEvent::Completed {
            token,
            result: Ok("aGVsbG8gd29ybGQ=".into()),
            elapsed: Duration::from_millis(8),
        });

        assert_eq!(app.output.text(), "aGVsbG8gd29ybGQ=");
        let stats = app.stats.unwrap();
        assert_eq!((stats.input_size, stats.output_size), (11, 16));
        assert_eq!(stats.ratio_text(), "1.45");
        assert!(!app.is_busy());
    }

    #[test]
    fn failure_raises_alert_and_leaves_output_empty() {
        let mut app = app_with_input("hello");
        let token = dispatched_token(&app.run());

        let _ = app.handle(AppEvent::Completed {
            token,
            result: Err("connection failed: refused".into()),
            elapsed: Duration::ZERO,
        });

        assert_eq!(app.alert(), Some("Error: connection failed: refused"));
        assert!(app.output.is_empty());
        assert!(app.stats.is_none());
        assert!(!app.is_busy());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut app = app_with_input("first");
        let first = dispatched_token(&app.run());
        let _ = app.set_mode(Mode::Decompress);
        let second = dispatched_token(&app.run());

        let actions = app.handle(AppEvent::Completed {
            token: first,
            result: Ok("late".into()),
            elapsed: Duration::ZERO,
        });

        assert!(actions.is_empty());
        assert!(app.output.is_empty());
        assert_eq!(app.in_flight().map(|run| run.token), Some(second));
    }

    #[test]
    fn stale_failure_is_discarded() {
        let mut app = app_with_input("first");
        let first = dispatched_token(&app.run());
        let second = dispatched_token(&app.run());

        let actions = app.handle(AppEvent::Completed {
            token: first,
            result: Err("connection failed: refused".into()),
            elapsed: Duration::ZERO,
        });

        assert!(actions.is_empty());
        assert!(app.alert().is_none());
        assert!(app.is_busy());
        assert_eq!(app.in_flight().map(|run| run.token), Some(second));
    }

    #[test]
    fn ratio_follows_mode_at_dispatch() {
        let mut app = app_with_input("abcd");
        let token = dispatched_token(&app.run());
        let _ = app.set_mode(Mode::Decompress);

        let _ = app.handle(AppEvent::Completed {
            token,
            result: Ok("ab".into()),
            elapsed: Duration::ZERO,
        });

        assert_eq!(app.stats.map(|s| s.ratio_text()), Some("0.50".to_owned()));
    }

    #[test]
    fn alert_blocks_keys_until_dismissed() {
        let mut app = app_with_input("x");
        app.alert = Some("Error: boom".into());

        assert!(app.handle(AppEvent::Key(KeyInput::Char('y'))).is_empty());
        assert!(app.handle(AppEvent::Key(KeyInput::F(5))).is_empty());
        assert_eq!(app.input.text(), "x");

        let _ = app.handle(AppEvent::Key(KeyInput::Enter));
        assert!(app.alert.is_none());
    }

    #[test]
    fn run_key_is_ignored_while_busy() {
        let mut app = app_with_input("x");
        let _ = app.run();

        let actions = app.handle(AppEvent::Key(KeyInput::Ctrl('r')));

        assert!(matches!(actions.as_slice(), [AppAction::Render]));
        assert_eq!(app.last_token, RequestToken(1));
        assert!(app.status_message.is_some());
    }

    #[test]
    fn completion_clears_busy_notice() {
        let mut app = app_with_input("x");
        let token = dispatched_token(&app.run());
        let _ = app.handle(AppEvent::Key(KeyInput::F(5)));
        assert!(app.status_message().is_some());

        let _ = app.handle(AppEvent::Completed { token, result: Ok("eA==".into()), elapsed: Duration::ZERO });

        assert!(!app.is_busy());
        assert!(app.status_message().is_none());
    }

    #[test]
    fn tab_switches_edited_pane() {
        let mut app = App::new("http://localhost:5000".into());
        let _ = app.handle(AppEvent::Key(KeyInput::Char('a')));
        let _ = app.handle(AppEvent::Key(KeyInput::Tab));
        let _ = app.handle(AppEvent::Key(KeyInput::Char('b')));

        assert_eq!(app.input.text(), "a");
        assert_eq!(app.output.text(), "b");
    }

    #[test]
    fn paste_inserts_at_cursor() {
        let mut app = app_with_input("hello");
        let _ = app.handle(AppEvent::Key(KeyInput::Home));
        let _ = app.handle(AppEvent::Paste("say ".into()));

        assert_eq!(app.input.text(), "say hello");
        assert_eq!(app.input.cursor(), 4);
    }

    #[test]
    fn mode_keys_select_mode() {
        let mut app = App::new("http://localhost:5000".into());
        let _ = app.handle(AppEvent::Key(KeyInput::F(3)));
        assert_eq!(app.mode, Mode::Decompress);
        let _ = app.handle(AppEvent::Key(KeyInput::Ctrl('t')));
        assert_eq!(app.mode, Mode::Compress);
        let _ = app.handle(AppEvent::Key(KeyInput::F(2)));
        assert_eq!(app.mode, Mode::Compress);
    }

    #[test]
    fn tick_only_renders_while_busy() {
        let mut app = app_with_input("x");
        assert!(app.handle(AppEvent::Tick).is_empty());
        let _ = app.run();
        assert!(matches!(app.handle(AppEvent::Tick).as_slice(), [AppAction::Render]));
        assert_eq!(app.spinner, 1);
    }

    #[test]
    fn esc_quits() {
        let mut app = App::new("http://localhost:5000".into());
        let actions = app.handle(AppEvent::Key(KeyInput::Esc));
        assert!(matches!(actions.as_slice(), [AppAction::Quit]));
    }

    #[test]
    fn ctrl_quit_chords() {
        let mut app = App::new("http://localhost:5000".into());
        for c in ['q', 'c'] {
            let actions = app.handle(AppEvent::Key(KeyInput::Ctrl(c)));
            assert!(matches!(actions.as_slice(), [AppAction::Quit]));
        }
    }
}
