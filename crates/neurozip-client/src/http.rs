//! HTTP transport over reqwest.
//!
//! One POST per operation, no retry, no timeout: the service's own latency
//! bounds every call. Every failure mode collapses into [`TransportError`].

use reqwest::{Client, Response, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    CompressReply, DecompressReply, Health, Transport, TransportError,
    wire::{CompressBody, DecompressBody, Reply},
};

/// Address the service listens on unless configured otherwise.
pub const DEFAULT_SERVER: &str = "http://localhost:5000";

/// [`Transport`] that talks JSON over HTTP to a fixed base address.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    /// Create a transport for the service at `base`.
    ///
    /// A base with a path prefix (`http://host/neurozip`) is kept: endpoints
    /// are resolved relative to it.
    pub fn new(base: &str) -> Result<Self, TransportError> {
        let client =
            Client::builder().build().map_err(|e| TransportError::Connection(e.to_string()))?;
        Self::with_client(client, base)
    }

    /// Create a transport reusing an existing reqwest client.
    pub fn with_client(client: Client, base: &str) -> Result<Self, TransportError> {
        let mut base =
            Url::parse(base).map_err(|e| TransportError::InvalidAddress(format!("{base}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(TransportError::InvalidAddress(base.to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { client, base })
    }

    /// Base address every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base.join(path).map_err(|e| TransportError::InvalidAddress(e.to_string()))
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        decode(response).await
    }
}

/// Check the status and parse either the expected body or a service error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%status, url = %response.url(), "service rejected request");
        return Err(TransportError::Status(status.as_u16()));
    }

    let reply: Reply<T> =
        response.json().await.map_err(|e| TransportError::Protocol(e.to_string()))?;
    reply.into_result()
}

impl Transport for HttpTransport {
    async fn compress(&self, text: &str) -> Result<CompressReply, TransportError> {
        self.post("compress", &CompressBody { text }).await
    }

    async fn decompress(&self, data: &str) -> Result<DecompressReply, TransportError> {
        self.post("decompress", &DecompressBody { data }).await
    }

    async fn health(&self) -> Result<Health, TransportError> {
        let url = self.base.clone();
        tracing::debug!(%url, "GET");

        let response =
            self.client.get(url).send().await.map_err(|e| TransportError::Connection(e.to_string()))?;
        decode(response).await
    }
}
