//! Echo service command-line entry point.

use anyhow::Context;
use clap::Parser;

use echo_service::{options::CliOptions, start_service};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let service_opts = CliOptions::parse()
        .into_service_options()
        .context("Failed to parse options")?;

    start_service(service_opts).await?;

    Ok(())
}
