//! Wire types shared by the echo client and the echo service.

use serde::Serialize;
use serde_json::Value;

/// Message returned by the service when the request has no `message` key.
pub const NO_MESSAGE_PROVIDED: &str = "No message provided";

/// Body of the POST sent by the transport wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EchoRequest {
    pub message: String,
}

/// Successful reply from the echo service.
///
/// The value is whatever the request carried under `message`, unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EchoReply {
    pub echo: Value,
}

/// Error reply from the echo service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn no_message() -> Self {
        Self {
            error: NO_MESSAGE_PROVIDED.to_string(),
        }
    }
}
