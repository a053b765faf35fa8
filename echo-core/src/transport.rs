//! Transport wrapper for the echo client.
//!
//! The transport issues a single HTTP POST carrying `{"message": ...}` to the
//! fixed echo path and hands back the server's JSON, or the failure, unmodified.
//! It is used by the `EchoForm` to resolve each submission.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{EchoError, Result};
use crate::wire::EchoRequest;

/// Path of the echo endpoint relative to the origin.
pub const ECHO_PATH: &str = "/api/echo";

/// Transport abstraction for sending one echo request.
#[async_trait]
pub trait EchoTransport: Send + Sync {
    /// Send `message` and return the response body as opaque JSON.
    ///
    /// Makes exactly one attempt: no retry, no timeout.
    async fn send_echo(&self, message: &str) -> Result<Value>;
}

/// HTTP implementation of the transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport targeting `ECHO_PATH` on the given origin.
    ///
    /// The origin must be an absolute http or https URL; any path it carries
    /// is replaced by the echo path.
    pub fn new(origin: &str) -> Result<Self> {
        let origin = Url::parse(origin)?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(EchoError::Config {
                reason: format!("Unsupported scheme '{}' in origin {}", origin.scheme(), origin),
            });
        }

        Ok(Self {
            client: Client::new(),
            endpoint: origin.join(ECHO_PATH)?,
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn read_failure(&self, response: Response) -> EchoError {
        let status = response.status();

        // Keep JSON bodies structured, fall back to the raw text otherwise
        let body = match response.text().await {
            Ok(text) if text.is_empty() => Value::Null,
            Ok(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
            Err(e) => Value::String(format!("Failed to read response body: {}", e)),
        };

        EchoError::Status {
            url: self.endpoint.to_string(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        }
    }
}

#[async_trait]
impl EchoTransport for HttpTransport {
    async fn send_echo(&self, message: &str) -> Result<Value> {
        let url = self.endpoint.to_string();
        debug!("Posting echo request to {}", url);

        // Send the request, one attempt only
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&EchoRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(|e| EchoError::Network {
                url: url.clone(),
                message: e.to_string(),
            })?;

        // Non-success statuses carry their body into the error
        if !response.status().is_success() {
            return Err(self.read_failure(response).await);
        }

        let bytes = response.bytes().await.map_err(|e| EchoError::Network {
            url: url.clone(),
            message: e.to_string(),
        })?;

        // An empty success body has nothing to decode
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| EchoError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_replaces_origin_path() {
        let transport = HttpTransport::new("http://127.0.0.1:3000/some/page").unwrap();
        assert_eq!(transport.endpoint().as_str(), "http://127.0.0.1:3000/api/echo");
    }

    #[test]
    fn rejects_relative_and_non_http_origins() {
        assert!(matches!(
            HttpTransport::new("localhost:3000/"),
            Err(EchoError::Config { .. })
        ));
        assert!(matches!(
            HttpTransport::new("not a url"),
            Err(EchoError::Config { .. })
        ));
        assert!(matches!(
            HttpTransport::new("ftp://example.com"),
            Err(EchoError::Config { .. })
        ));
    }
}
