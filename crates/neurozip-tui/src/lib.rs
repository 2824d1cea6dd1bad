//! Terminal UI for NeuroZip
//!
//! A thin shell over [`neurozip_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`neurozip_app::Runtime`].
//!
//! This crate handles terminal rendering, command-line configuration and log
//! setup.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod logging;
pub mod terminal;
pub mod ui;

pub use config::{Args, Config, ConfigError};
pub use neurozip_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
