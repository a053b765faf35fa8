//! The Echo Exchange: the transient request/response pair held by a form.

use serde::Serialize;
use serde_json::Value;

use crate::error::{EchoError, Result};

/// State of one form: the message being edited and the outcome of the most
/// recently resolved attempt.
///
/// `response` and `error` are never both present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EchoExchange {
    /// Text currently in the input, replaced on every edit
    pub outgoing_message: String,

    /// Success payload of the last resolved attempt
    pub response: Option<Value>,

    /// Failure of the last resolved attempt
    pub error: Option<EchoError>,

    /// Number of submissions made from this form
    pub generation: u64,

    /// Number of completions stored so far
    pub resolutions: u64,
}

impl EchoExchange {
    /// Whether either payload is present.
    pub fn has_result(&self) -> bool {
        self.response.is_some() || self.error.is_some()
    }

    /// Clear both payloads ahead of a new attempt.
    pub(crate) fn begin_attempt(&mut self) -> u64 {
        self.response = None;
        self.error = None;
        self.generation += 1;
        self.generation
    }

    /// Store the outcome of an attempt, overwriting whatever was there.
    pub(crate) fn resolve(&mut self, outcome: Result<Value>) {
        self.resolutions += 1;
        match outcome {
            Ok(value) => {
                self.response = Some(value);
                self.error = None;
            }
            Err(err) => {
                self.response = None;
                self.error = Some(err);
            }
        }
    }
}
