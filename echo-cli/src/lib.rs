//! Terminal shell for the echo client.
//!
//! Mounts one echo form under a static heading and drives it from stdin or
//! a single command-line message, against a remote or embedded echo service.

pub mod app;
pub mod args;
pub mod embedded;

pub use app::{App, HEADING};
pub use args::Cli;
pub use embedded::EmbeddedService;
