//! Error types for the echo client.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Transport failure surfaced by the echo client.
///
/// The form stores this verbatim as its error payload, so it is `Clone` and
/// serializes to the object shown in the error block.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EchoError {
    /// The server answered with a non-success status
    #[error("Http failure response for {url}: {status} {status_text}")]
    Status {
        url: String,
        status: u16,
        status_text: String,
        body: Value,
    },

    /// The request never produced a response
    #[error("Http failure during request for {url}: {message}")]
    Network { url: String, message: String },

    /// A success response whose body was not JSON
    #[error("Http failure during parsing for {url}: {message}")]
    Decode { url: String, message: String },

    /// The transport was configured with an unusable origin
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

/// Result type alias for echo client operations
pub type Result<T> = std::result::Result<T, EchoError>;

impl EchoError {
    /// HTTP status of the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            EchoError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<url::ParseError> for EchoError {
    fn from(err: url::ParseError) -> Self {
        EchoError::Config {
            reason: format!("URL error: {}", err),
        }
    }
}
