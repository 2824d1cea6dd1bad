//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but feeds
//! the runtime from a script instead of a keyboard. It implements [`Driver`]
//! so the same [`neurozip_app::Runtime`] orchestration code runs in both
//! production and simulation.
//!
//! Waits in the script sleep on the tokio clock; with a paused clock the
//! whole session runs instantly and deterministically.

use std::{collections::VecDeque, time::Duration};

use neurozip_app::{App, AppEvent, Driver, KeyInput};
use tokio::time::Instant;

use crate::invariants::{InvariantRegistry, SessionSnapshot};

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// One entry of a simulation script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimStep {
    /// Deliver an event to the runtime.
    Event(AppEvent),
    /// Let time pass before the next step.
    Wait(Duration),
}

/// Simulation driver for deterministic testing.
///
/// Every render records a [`SessionSnapshot`]; with invariants enabled each
/// render also checks the recorded history and fails the run on a
/// violation.
pub struct SimDriver {
    script: VecDeque<SimStep>,
    wait_until: Option<Instant>,
    snapshots: Vec<SessionSnapshot>,
    invariants: Option<InvariantRegistry>,
    stopped: bool,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a driver with an empty script.
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            wait_until: None,
            snapshots: Vec::new(),
            invariants: None,
            stopped: false,
        }
    }

    /// Enable invariant checking.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Append an event.
    #[must_use]
    pub fn event(mut self, event: AppEvent) -> Self {
        self.script.push_back(SimStep::Event(event));
        self
    }

    /// Append a key press.
    #[must_use]
    pub fn key(self, key: KeyInput) -> Self {
        self.event(AppEvent::Key(key))
    }

    /// Append one key press per character, `'\n'` as Enter.
    #[must_use]
    pub fn type_text(self, text: &str) -> Self {
        text.chars().fold(self, |driver, c| match c {
            '\n' => driver.key(KeyInput::Enter),
            c => driver.key(KeyInput::Char(c)),
        })
    }

    /// Append a bracketed paste.
    #[must_use]
    pub fn paste(self, text: impl Into<String>) -> Self {
        self.event(AppEvent::Paste(text.into()))
    }

    /// Append a pause.
    #[must_use]
    pub fn wait(mut self, duration: Duration) -> Self {
        self.script.push_back(SimStep::Wait(duration));
        self
    }

    /// Snapshots recorded at each render, oldest first.
    pub fn snapshots(&self) -> &[SessionSnapshot] {
        &self.snapshots
    }

    /// Number of renders so far.
    pub fn render_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the runtime has released the driver.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Steps not yet delivered.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    // Cancel-safe: a pending wait is kept in `wait_until` and resumed on the
    // next poll.
    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        loop {
            if let Some(deadline) = self.wait_until {
                tokio::time::sleep_until(deadline).await;
                self.wait_until = None;
            }

            match self.script.pop_front() {
                Some(SimStep::Event(event)) => return Ok(Some(event)),
                Some(SimStep::Wait(duration)) => {
                    self.wait_until = Some(Instant::now() + duration);
                },
                None => return Ok(None),
            }
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.snapshots.push(SessionSnapshot::from_app(app));

        if let Some(ref registry) = self.invariants
            && let Err(violations) = registry.check_all(&self.snapshots)
        {
            let report: Vec<String> = violations.iter().map(ToString::to_string).collect();
            tracing::error!(render = self.snapshots.len(), "invariant violated");
            return Err(SimDriverError(format!(
                "after render {}: {}",
                self.snapshots.len(),
                report.join("; ")
            )));
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
