//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (Keyboard, Resize) and system ticks.
//! - Completions reported by the runtime for dispatched service calls.

use std::time::Duration;

use crate::{KeyInput, RequestToken, ServiceStatus};

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Text pasted into the focused pane.
    Paste(String),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// A dispatched request finished.
    Completed {
        /// Token the request was dispatched with.
        token: RequestToken,
        /// Payload on success, error text on failure.
        result: Result<String, String>,
        /// Wall-clock time from dispatch to completion.
        elapsed: Duration,
    },

    /// Result of a service probe.
    Service(ServiceStatus),
}
