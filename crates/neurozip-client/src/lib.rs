//! Transport client for the NeuroZip compression service.
//!
//! The service is an opaque HTTP endpoint that compresses text into a
//! text-safe payload and back. This crate knows only its JSON wire shapes:
//!
//! - `POST /compress` with `{"text": ...}` answers `{"data": ...}`
//! - `POST /decompress` with `{"data": ...}` answers `{"text": ...}`
//! - `GET /` answers `{"status": ..., "message": ...}`
//!
//! # Components
//!
//! - [`Transport`]: the seam used by the application runtime and tests
//! - [`HttpTransport`]: production implementation over reqwest
//! - [`Request`]: one compress or decompress call
//! - [`TransportError`]: the single failure type surfaced to callers

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod http;
mod request;
mod transport;
pub mod wire;

pub use error::TransportError;
pub use http::{DEFAULT_SERVER, HttpTransport};
pub use request::{Mode, Request};
pub use transport::Transport;
pub use wire::{CompressReply, DecompressReply, Health};
