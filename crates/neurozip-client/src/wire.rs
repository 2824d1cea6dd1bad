//! JSON bodies exchanged with the service.

use serde::{Deserialize, Serialize};

use crate::TransportError;

/// Body of `POST /compress`.
#[derive(Debug, Serialize)]
pub struct CompressBody<'a> {
    /// Text to compress.
    pub text: &'a str,
}

/// Body of `POST /decompress`.
#[derive(Debug, Serialize)]
pub struct DecompressBody<'a> {
    /// Payload to decompress.
    pub data: &'a str,
}

/// Successful answer to `POST /compress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressReply {
    /// Compressed payload (Base64 text).
    pub data: String,
}

/// Successful answer to `POST /decompress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompressReply {
    /// Recovered text.
    pub text: String,
}

/// Answer to `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Service status word, `"ok"` when healthy.
    pub status: String,
    /// Optional human-readable detail.
    #[serde(default)]
    pub message: Option<String>,
}

impl Health {
    /// Whether the service reported itself healthy.
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// Any response body: either the expected shape or a service failure.
///
/// The service answers failures with HTTP 200 and `{"error": ...}`, so the
/// failure shape is tried first.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Reply<T> {
    Failed { error: String },
    Ok(T),
}

impl<T> Reply<T> {
    pub(crate) fn into_result(self) -> Result<T, TransportError> {
        match self {
            Self::Failed { error } => Err(TransportError::Service(error)),
            Self::Ok(value) => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, TransportError> {
        serde_json::from_str::<Reply<T>>(body)
            .map_err(|e| TransportError::Protocol(e.to_string()))?
            .into_result()
    }

    #[test]
    fn compress_reply_decodes() {
        let reply: CompressReply = parse(r#"{"data":"aGVsbG8="}"#).unwrap();
        assert_eq!(reply.data, "aGVsbG8=");
    }

    #[test]
    fn error_body_becomes_service_error() {
        let err = parse::<DecompressReply>(r#"{"error":"Decompression failed: bad header"}"#)
            .unwrap_err();
        assert_eq!(err, TransportError::Service("Decompression failed: bad header".into()));
        assert_eq!(err.to_string(), "Decompression failed: bad header");
    }

    #[test]
    fn wrong_shape_is_protocol_error() {
        let err = parse::<DecompressReply>(r#"{"data":"oops"}"#).unwrap_err();
        assert!(matches!(err, TransportError::Protocol(_)));
    }

    #[test]
    fn health_message_is_optional() {
        let health: Health = parse(r#"{"status":"ok"}"#).unwrap();
        assert!(health.is_ok());
        assert_eq!(health.message, None);
    }

    #[test]
    fn request_bodies_use_service_keys() {
        let body = serde_json::to_string(&CompressBody { text: "hi" }).unwrap();
        assert_eq!(body, r#"{"text":"hi"}"#);
        let body = serde_json::to_string(&DecompressBody { data: "aGk=" }).unwrap();
        assert_eq!(body, r#"{"data":"aGk="}"#);
    }
}
