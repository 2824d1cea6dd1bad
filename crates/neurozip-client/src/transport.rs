//! Transport trait.
//!
//! Decouples the runtime from the HTTP client so the same orchestration runs
//! against the real service and against scripted mocks.

use std::future::Future;

use crate::{CompressReply, DecompressReply, Health, Request, TransportError};

/// Client for the two service operations plus a liveness probe.
///
/// Implementations must be cheap to clone; the runtime hands a clone to
/// every background task it spawns.
pub trait Transport: Clone + Send + Sync + 'static {
    /// Compress `text`.
    fn compress(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<CompressReply, TransportError>> + Send;

    /// Decompress a payload previously produced by [`Transport::compress`].
    fn decompress(
        &self,
        data: &str,
    ) -> impl Future<Output = Result<DecompressReply, TransportError>> + Send;

    /// Ask the service whether it is up.
    fn health(&self) -> impl Future<Output = Result<Health, TransportError>> + Send;

    /// Run `request` and return the resulting payload text.
    fn execute(&self, request: &Request) -> impl Future<Output = Result<String, TransportError>> + Send {
        async move {
            match request {
                Request::Compress { text } => self.compress(text).await.map(|reply| reply.data),
                Request::Decompress { data } => self.decompress(data).await.map(|reply| reply.text),
            }
        }
    }
}
