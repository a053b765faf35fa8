use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::debug;

use echo_cli::{App, Cli, EmbeddedService};
use echo_core::HttpTransport;
use echo_render::CliRenderer;
use echo_service::start_service;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    echo_service::init_tracing(cli.log_level());

    if cli.service {
        // Run only the service, in the foreground
        let options = cli.service_options().context("Invalid service options")?;
        start_service(options).await?;
        return Ok(());
    }

    // Keep the embedded service alive until the shell is done with it
    let (origin, _embedded) = match cli.remote_origin() {
        Some(origin) => (origin, None),
        None => {
            let service = EmbeddedService::start(cli.log_level())
                .await
                .context("Failed to start embedded echo service")?;
            (service.origin(), Some(service))
        }
    };
    debug!("Using echo service at {}", origin);

    // Build the form and the shell around it
    let transport = HttpTransport::new(&origin)
        .with_context(|| format!("Invalid service origin '{}'", origin))?;
    let renderer = CliRenderer::new()
        .with_mode(cli.display_mode())
        .with_color(!cli.no_color);
    let app = App::mount(Arc::new(transport), cli.resolve_policy(), renderer);

    match &cli.message {
        Some(message) => app.run_one_shot(message, &mut std::io::stdout()).await?,
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            app.run_interactive(stdin, std::io::stdout()).await?;
        }
    }

    Ok(())
}
