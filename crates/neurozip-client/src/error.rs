//! Transport errors.
//!
//! Callers are not expected to branch on the variant: every failure ends up
//! as the same "operation failed" notification carrying the display text.
//! The variants exist so logs say which layer gave up.

use thiserror::Error;

/// Errors produced by a [`crate::Transport`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The configured service address could not be used.
    #[error("invalid service address: {0}")]
    InvalidAddress(String),

    /// The request never produced a response (DNS, refused, reset).
    #[error("connection failed: {0}")]
    Connection(String),

    /// The service answered with a non-success HTTP status.
    #[error("service returned HTTP {0}")]
    Status(u16),

    /// The response body was not JSON or did not have the expected shape.
    #[error("malformed response: {0}")]
    Protocol(String),

    /// The service reported a failure in an `{"error": ...}` body.
    #[error("{0}")]
    Service(String),
}
