//! Route handlers for the echo service.

use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use echo_core::{EchoReply, ErrorBody};
use serde_json::Value;
use tracing::debug;

/// Text returned by the health route.
pub const RUNNING_BANNER: &str = "Echo API is running!";

/// `POST /echo`: reflect the `message` value back under `echo`.
///
/// Anything that is not a non-empty JSON object with a `message` key is a 400.
/// The value itself is not checked, so `""` and non-string values are echoed.
pub async fn echo(body: Bytes) -> Response {
    // Only a JSON object can carry the message
    let message = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(mut fields)) => fields.remove("message"),
        Ok(_) => None,
        Err(e) => {
            debug!("Rejecting unparseable echo body: {}", e);
            None
        }
    };

    match message {
        Some(echo) => Json(EchoReply { echo }).into_response(),
        None => (StatusCode::BAD_REQUEST, Json(ErrorBody::no_message())).into_response(),
    }
}

/// `GET /`: plain-text liveness banner.
pub async fn home() -> &'static str {
    RUNNING_BANNER
}
