//! Core types and functionality for the echo client.
//!
//! This crate provides the Echo Exchange data model, the error type surfaced to
//! the user, the wire types shared with the echo service, the transport
//! wrapper that issues the HTTP POST, and the form state that ties them together.

mod error;
mod exchange;
mod form;
mod transport;
mod wire;

// Re-export core types
pub use error::{EchoError, Result};
pub use exchange::EchoExchange;
pub use form::{EchoForm, ResolvePolicy};
pub use transport::{EchoTransport, HttpTransport, ECHO_PATH};
pub use wire::{EchoReply, EchoRequest, ErrorBody, NO_MESSAGE_PROVIDED};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
