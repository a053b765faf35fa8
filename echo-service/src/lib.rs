//! Echo service for the echo client.
//!
//! This crate provides the HTTP backend the client posts to. It answers
//! `POST /echo` (also reachable as `/api/echo`, the path the client uses
//! behind a proxy) and can serve a static directory next to it.

pub mod options;
pub mod routes;
pub mod server;

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub use server::build_router;

/// Error type for echo service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

/// Type alias for service results
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Verbosity of the service's own tracing output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    #[default]
    Normal,
    Quiet,
}

impl LogLevel {
    /// Pick a level from the usual `--debug` / `--quiet` flags.
    pub fn from_flags(debug: bool, quiet: bool) -> Self {
        if debug {
            LogLevel::Debug
        } else if quiet {
            LogLevel::Quiet
        } else {
            LogLevel::Normal
        }
    }

    /// Filter directives for `tracing_subscriber::EnvFilter`.
    pub fn filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "echo_service=debug,echo_core=debug,echo_cli=debug,tower_http=debug",
            LogLevel::Normal => "echo_service=warn,echo_core=warn,echo_cli=warn,tower_http=warn",
            LogLevel::Quiet => "echo_service=error,echo_core=error,echo_cli=error,tower_http=error",
        }
    }
}

/// Install the global fmt subscriber for `level`.
///
/// Does nothing if a subscriber is already installed.
pub fn init_tracing(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level.filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Configuration options for the echo service.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Address to bind the server to
    pub bind_address: SocketAddr,

    /// Directory served for paths no route matches
    pub static_dir: Option<PathBuf>,

    /// Whether the service installs its own tracing subscriber
    pub init_tracing: bool,

    /// Verbosity used when installing the subscriber
    pub log_level: LogLevel,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: None,
            init_tracing: true,
            log_level: LogLevel::Normal,
        }
    }
}

/// Start the echo service with the given options.
///
/// This is the main entry point for starting the service programmatically.
pub async fn start_service(options: ServiceOptions) -> Result<()> {
    server::run_server(options).await
}
