//! Embedded echo service for the CLI.
//!
//! When no remote service is given, the CLI starts an echo service in-process
//! on a free local port and points the client at it.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use echo_service::{start_service, LogLevel, ServiceOptions};

const READY_TIMEOUT: Duration = Duration::from_secs(5);
const READY_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Embedded service manager
pub struct EmbeddedService {
    /// The handle to the service task
    handle: JoinHandle<()>,

    /// The address the service is bound to
    address: SocketAddr,
}

impl EmbeddedService {
    /// Start an embedded service and return a handle to it
    pub async fn start(log_level: LogLevel) -> Result<Self> {
        // Find an available port
        let port = portpicker::pick_unused_port().ok_or_else(|| anyhow!("No available ports"))?;
        let address = SocketAddr::from(([127, 0, 0, 1], port));

        debug!("Starting embedded echo service on port {}", port);

        let options = ServiceOptions {
            bind_address: address,
            static_dir: None,
            init_tracing: false, // The CLI already installed its subscriber
            log_level,
        };

        // Serve on a background task for as long as this handle lives
        let handle = tokio::spawn(async move {
            if let Err(e) = start_service(options).await {
                error!("Embedded service error: {}", e);
            }
        });

        wait_for_service_ready(address, &handle).await?;

        Ok(Self { handle, address })
    }

    /// Origin the client should target
    pub fn origin(&self) -> String {
        format!("http://{}", self.address)
    }
}

impl Drop for EmbeddedService {
    fn drop(&mut self) {
        debug!("Stopping embedded echo service");
        self.handle.abort();
    }
}

/// Poll until the service accepts connections, giving up early if its task exits.
async fn wait_for_service_ready(address: SocketAddr, handle: &JoinHandle<()>) -> Result<()> {
    let ready = async {
        loop {
            if handle.is_finished() {
                return Err(anyhow!("Embedded service stopped before accepting connections"));
            }
            if tokio::net::TcpStream::connect(address).await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    };

    tokio::time::timeout(READY_TIMEOUT, ready)
        .await
        .map_err(|_| anyhow!("Embedded service not ready after {:?}", READY_TIMEOUT))??;

    debug!("Embedded service is ready on {}", address);
    Ok(())
}
