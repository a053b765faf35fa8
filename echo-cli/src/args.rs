use std::path::PathBuf;

use clap::Parser;
use echo_core::ResolvePolicy;
use echo_render::DisplayMode;
use echo_service::{LogLevel, ServiceError, ServiceOptions};

/// Command line arguments for the echo CLI
#[derive(Parser, Debug)]
#[command(author, version, about = "Send messages to an echo service")]
pub struct Cli {
    /// Send this message once, print the result and exit
    #[arg(short, long)]
    pub message: Option<String>,

    /// Connect to a running service (host:port or full URL)
    #[arg(long, conflicts_with = "service")]
    pub remote: Option<String>,

    /// Use https when --remote is a bare host
    #[arg(long)]
    pub secure: bool,

    /// Run only the echo service in the foreground
    #[arg(long)]
    pub service: bool,

    /// Address to bind to when in service mode
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub bind: String,

    /// Serve static files from the specified directory in service mode
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Output raw JSON
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Disable colored output
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Ignore results of submissions that were superseded by a newer one
    #[arg(long, default_value_t = false)]
    pub discard_stale: bool,

    /// Enable verbose debug output
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_flags(self.debug, self.quiet)
    }

    pub fn display_mode(&self) -> DisplayMode {
        if self.raw {
            DisplayMode::Raw
        } else {
            DisplayMode::Formatted
        }
    }

    pub fn resolve_policy(&self) -> ResolvePolicy {
        if self.discard_stale {
            ResolvePolicy::LatestSubmitted
        } else {
            ResolvePolicy::LastResolved
        }
    }

    /// Options for `--service` mode, validated the same way as the service binary.
    ///
    /// The CLI installs its own subscriber, so the service must not.
    pub fn service_options(&self) -> Result<ServiceOptions, ServiceError> {
        let options = ServiceOptions::from_args(&self.bind, self.static_dir.clone(), self.log_level())?;
        Ok(ServiceOptions {
            init_tracing: false,
            ..options
        })
    }

    /// Origin of the remote service, if one was given.
    pub fn remote_origin(&self) -> Option<String> {
        self.remote.as_deref().map(|remote| {
            if remote.contains("://") {
                remote.to_string()
            } else {
                let scheme = if self.secure { "https" } else { "http" };
                format!("{}://{}", scheme, remote)
            }
        })
    }
}
