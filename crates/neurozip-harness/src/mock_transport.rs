//! Transports that never touch the network.
//!
//! [`ScriptedTransport`] replays queued replies and records every call;
//! [`Base64Transport`] behaves like a well-formed service whose "compression"
//! is plain Base64, so compress followed by decompress is the identity.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use neurozip_client::{CompressReply, DecompressReply, Health, Request, Transport, TransportError};

/// One queued answer of a [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedReply {
    /// Simulated service latency.
    pub delay: Duration,
    /// Payload text on success.
    pub result: Result<String, TransportError>,
}

impl ScriptedReply {
    /// Immediate success carrying `payload`.
    pub fn ok(payload: impl Into<String>) -> Self {
        Self { delay: Duration::ZERO, result: Ok(payload.into()) }
    }

    /// Immediate failure.
    pub fn err(error: TransportError) -> Self {
        Self { delay: Duration::ZERO, result: Err(error) }
    }

    /// Delay this reply by `delay`.
    #[must_use]
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug)]
struct Script {
    replies: VecDeque<ScriptedReply>,
    calls: Vec<Request>,
    health: Result<Health, TransportError>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            replies: VecDeque::new(),
            calls: Vec::new(),
            health: Ok(Health { status: "ok".into(), message: None }),
        }
    }
}

/// Transport answering from a queue of [`ScriptedReply`]s.
///
/// Replies are consumed in call order regardless of operation. A call with no
/// reply left fails with [`TransportError::Connection`]. Clones share the
/// same script, so a test can keep a handle after giving one to the runtime.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    /// Create a transport with an empty script and a healthy probe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply.
    #[must_use]
    pub fn reply(self, reply: ScriptedReply) -> Self {
        self.push(reply);
        self
    }

    /// Set the answer to health probes.
    #[must_use]
    pub fn with_health(self, health: Result<Health, TransportError>) -> Self {
        self.lock().health = health;
        self
    }

    /// Queue a reply through a shared handle.
    pub fn push(&self, reply: ScriptedReply) {
        self.lock().replies.push_back(reply);
    }

    /// Every compress and decompress call received, in order.
    pub fn calls(&self) -> Vec<Request> {
        self.lock().calls.clone()
    }

    /// Replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lock().replies.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `request` and take the reply for it. The guard is released
    /// before the caller sleeps.
    fn next_reply(&self, request: Request) -> ScriptedReply {
        let mut script = self.lock();
        script.calls.push(request);
        script.replies.pop_front().unwrap_or_else(|| {
            tracing::warn!("scripted transport ran out of replies");
            ScriptedReply::err(TransportError::Connection("no scripted reply".into()))
        })
    }

    async fn answer(&self, request: Request) -> Result<String, TransportError> {
        let reply = self.next_reply(request);
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}

impl Transport for ScriptedTransport {
    async fn compress(&self, text: &str) -> Result<CompressReply, TransportError> {
        let data = self.answer(Request::Compress { text: text.to_owned() }).await?;
        Ok(CompressReply { data })
    }

    async fn decompress(&self, data: &str) -> Result<DecompressReply, TransportError> {
        let text = self.answer(Request::Decompress { data: data.to_owned() }).await?;
        Ok(DecompressReply { text })
    }

    async fn health(&self) -> Result<Health, TransportError> {
        self.lock().health.clone()
    }
}

/// Service stand-in that encodes with standard Base64.
///
/// Decompressing anything that is not Base64 of UTF-8 text fails the way the
/// real service reports failures: a [`TransportError::Service`] message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Transport {
    latency: Duration,
}

impl Base64Transport {
    /// Create a transport answering immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call after `latency`.
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    async fn wait(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Transport for Base64Transport {
    async fn compress(&self, text: &str) -> Result<CompressReply, TransportError> {
        self.wait().await;
        Ok(CompressReply { data: STANDARD.encode(text) })
    }

    async fn decompress(&self, data: &str) -> Result<DecompressReply, TransportError> {
        self.wait().await;
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| TransportError::Service(format!("Decompression failed: {e}")))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| TransportError::Service(format!("Decompression failed: {e}")))?;
        Ok(DecompressReply { text })
    }

    async fn health(&self) -> Result<Health, TransportError> {
        Ok(Health { status: "ok".into(), message: Some("Base64 stand-in".into()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_replies_are_consumed_in_order() {
        let transport = ScriptedTransport::new()
            .reply(ScriptedReply::ok("first"))
            .reply(ScriptedReply::err(TransportError::Status(500)));

        assert_eq!(transport.compress("a").await.map(|r| r.data), Ok("first".to_owned()));
        assert_eq!(transport.decompress("b").await, Err(TransportError::Status(500)));
        assert!(matches!(transport.compress("c").await, Err(TransportError::Connection(_))));

        assert_eq!(transport.calls(), vec![
            Request::Compress { text: "a".into() },
            Request::Decompress { data: "b".into() },
            Request::Compress { text: "c".into() },
        ]);
    }

    #[tokio::test]
    async fn base64_round_trips() {
        let transport = Base64Transport::new();
        let data = transport.compress("hello world").await.map(|r| r.data);
        assert_eq!(data, Ok("aGVsbG8gd29ybGQ=".to_owned()));

        let text = transport.decompress("aGVsbG8=\n").await.map(|r| r.text);
        assert_eq!(text, Ok("hello".to_owned()));
    }

    #[tokio::test]
    async fn base64_rejects_garbage() {
        let result = Base64Transport::new().decompress("not base64!").await;
        assert!(matches!(result, Err(TransportError::Service(msg)) if msg.starts_with("Decompression failed")));
    }
}
