//! Observable session state for invariant checks.

use neurozip_app::{App, Mode, RequestToken};

/// What the App exposes at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Current mode.
    pub mode: Mode,
    /// Token of the run awaiting completion. `None` when idle.
    pub in_flight: Option<RequestToken>,
    /// Latest token issued.
    pub last_token: RequestToken,
    /// Statistics record present.
    pub has_stats: bool,
    /// Output pane length in characters.
    pub output_chars: usize,
    /// Notification pending.
    pub has_alert: bool,
}

impl SessionSnapshot {
    /// Capture the observable state of `app`.
    pub fn from_app(app: &App) -> Self {
        Self {
            mode: app.mode(),
            in_flight: app.in_flight().map(|run| run.token),
            last_token: app.last_token(),
            has_stats: app.stats().is_some(),
            output_chars: app.output().char_len(),
            has_alert: app.alert().is_some(),
        }
    }

    /// Whether a run is awaiting completion.
    pub fn busy(&self) -> bool {
        self.in_flight.is_some()
    }
}
