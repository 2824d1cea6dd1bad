//! Deterministic simulation harness for the NeuroZip client.
//!
//! Scripted implementations of the [`neurozip_app::Driver`] and
//! [`neurozip_client::Transport`] traits, so the production
//! [`neurozip_app::Runtime`] can be exercised end to end on a paused tokio
//! clock without a terminal or a service.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the session
//! invariants; [`SimDriver::with_invariants`] checks them on every render.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod mock_transport;
pub mod sim_driver;

pub use invariants::{
    AlertExcludesResult, InFlightIsLatest, Invariant, InvariantRegistry, InvariantResult,
    SessionSnapshot, StatsOnlyWhenIdle, TokenMonotonicity, Violation,
};
pub use mock_transport::{Base64Transport, ScriptedReply, ScriptedTransport};
pub use sim_driver::{SimDriver, SimDriverError, SimStep};
