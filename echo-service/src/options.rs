//! Configuration options for the echo service.
//!
//! This module defines the command-line options of the standalone service
//! and their conversion into `ServiceOptions`.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::{LogLevel, ServiceError, ServiceOptions};

/// Command-line arguments for the echo service.
#[derive(Parser, Debug)]
#[command(author, version, about = "HTTP echo service")]
pub struct CliOptions {
    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    pub bind: String,

    /// Serve static files from the specified directory
    #[arg(short, long)]
    pub static_dir: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl CliOptions {
    /// Convert CLI options to ServiceOptions
    pub fn into_service_options(self) -> Result<ServiceOptions, ServiceError> {
        ServiceOptions::from_args(
            &self.bind,
            self.static_dir,
            LogLevel::from_flags(self.debug, self.quiet),
        )
    }
}

impl ServiceOptions {
    /// Validate command-line style arguments into service options.
    ///
    /// Shared by every binary that can run the service, so they accept and
    /// reject the same arguments.
    pub fn from_args(
        bind: &str,
        static_dir: Option<PathBuf>,
        log_level: LogLevel,
    ) -> Result<ServiceOptions, ServiceError> {
        // Parse bind address
        let bind_address = bind
            .parse::<SocketAddr>()
            .map_err(|e| ServiceError::InvalidOptions(format!("Invalid bind address '{}': {}", bind, e)))?;

        // The static directory must exist up front, not surface as 404s later
        if let Some(dir) = &static_dir {
            if !dir.is_dir() {
                return Err(ServiceError::InvalidOptions(format!(
                    "Static directory {} does not exist",
                    dir.display()
                )));
            }
        }

        Ok(ServiceOptions {
            bind_address,
            static_dir,
            init_tracing: true,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_to_localhost() {
        let options = CliOptions::parse_from(["echo-service"])
            .into_service_options()
            .unwrap();
        assert_eq!(options.bind_address, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(options.log_level, LogLevel::Normal);
        assert!(options.static_dir.is_none());
    }

    #[test]
    fn rejects_bad_bind_address() {
        let err = CliOptions::parse_from(["echo-service", "--bind", "nowhere"])
            .into_service_options()
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOptions(_)));
    }

    #[test]
    fn debug_wins_over_quiet() {
        let options = CliOptions::parse_from(["echo-service", "--debug", "--quiet"])
            .into_service_options()
            .unwrap();
        assert_eq!(options.log_level, LogLevel::Debug);
    }

    #[test]
    fn rejects_missing_static_dir() {
        let err = CliOptions::parse_from(["echo-service", "--static-dir", "/definitely/not/here"])
            .into_service_options()
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOptions(_)));
    }

    #[test]
    fn accepts_existing_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        let options = ServiceOptions::from_args("0.0.0.0:8080", Some(dir.path().to_path_buf()), LogLevel::Quiet)
            .unwrap();
        assert_eq!(options.static_dir.as_deref(), Some(dir.path()));
        assert_eq!(options.log_level, LogLevel::Quiet);
    }
}
