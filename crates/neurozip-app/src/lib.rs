//! Application layer for the NeuroZip client
//!
//! Pure session state machine and generic runtime, so the same orchestration
//! runs behind the terminal UI and inside deterministic simulation tests.
//!
//! # Components
//!
//! - [`App`]: session state machine (text panes, mode, busy flag, statistics)
//! - [`Driver`]: trait for platform-specific input and rendering
//! - [`Runtime`]: event loop that executes [`AppAction`]s against a
//!   [`neurozip_client::Transport`]
//!
//! # Request tokens
//!
//! Every run is tagged with a [`RequestToken`]. Completions carry the token
//! back and the App applies only the one matching the latest run, so a slow
//! response can never overwrite the result of a newer request.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod input;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use neurozip_client::{Mode, Request};
pub use runtime::Runtime;
pub use state::{Focus, InFlight, RequestToken, ServiceStatus, Stats, TextBuffer};
