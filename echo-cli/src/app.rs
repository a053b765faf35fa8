//! Application shell: a static heading with one echo form mounted under it.

use std::io::Write;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use echo_core::{EchoExchange, EchoForm, EchoTransport, ResolvePolicy};
use echo_render::{DisplayMode, Renderer};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const HEADING: &str = "League Pick Rate History";

pub struct App {
    form: EchoForm,
    renderer: Arc<dyn Renderer + Send + Sync>,
}

impl App {
    /// Mount the shell with a single form resolving through `transport`.
    pub fn mount<R>(transport: Arc<dyn EchoTransport>, policy: ResolvePolicy, renderer: R) -> Self
    where
        R: Renderer + Send + Sync + 'static,
    {
        Self {
            form: EchoForm::with_policy(transport, policy),
            renderer: Arc::new(renderer),
        }
    }

    pub fn form(&self) -> &EchoForm {
        &self.form
    }

    /// Heading plus the form in its current state. Raw mode has no chrome.
    pub fn render_shell(&self) -> Result<String> {
        if self.renderer.mode() == DisplayMode::Raw {
            return Ok(String::new());
        }
        Ok(format!(
            "{}\n{}",
            self.renderer.render_heading(HEADING),
            self.renderer.render_exchange(&self.form.snapshot())?
        ))
    }

    /// Submit one message, wait for its completion and print the result.
    pub async fn run_once<W: Write>(&self, message: &str, out: &mut W) -> Result<EchoExchange> {
        // Wait for the single completion before printing
        self.form
            .submit_message(message)
            .await
            .map_err(|e| anyhow!("Echo task failed: {}", e))?;

        let exchange = self.form.snapshot();
        if self.renderer.mode() == DisplayMode::Raw {
            writeln!(out, "{}", self.renderer.render_exchange(&exchange)?)?;
        } else {
            write!(out, "{}", self.render_shell()?)?;
        }
        out.flush()?;

        Ok(exchange)
    }

    /// One-shot mode: print the result of `message` and fail if it ended in an error.
    pub async fn run_one_shot<W: Write>(&self, message: &str, out: &mut W) -> Result<()> {
        let exchange = self.run_once(message, out).await?;
        match exchange.error {
            Some(err) => Err(anyhow!(err)),
            None => Ok(()),
        }
    }

    /// Submit every input line as it is read, printing results as they land.
    ///
    /// Reading never waits for a request. At end of input the outstanding
    /// requests are awaited so every result is printed, then `out` is handed back.
    pub async fn run_interactive<I, W>(&self, input: I, mut out: W) -> Result<W>
    where
        I: AsyncBufRead + Unpin,
        W: Write + Send + 'static,
    {
        write!(out, "{}", self.render_shell()?)?;
        out.flush()?;

        // Print results from a separate task so reading never waits on them
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let printer = tokio::spawn(print_results(
            self.renderer.clone(),
            self.form.subscribe(),
            out,
            shutdown_rx,
        ));

        let mut pending: Vec<JoinHandle<()>> = Vec::new();
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            pending.retain(|handle| !handle.is_finished());
            pending.push(self.form.submit_message(line));
        }

        debug!("Input closed, waiting for {} outstanding requests", pending.len());
        for handle in pending {
            if let Err(e) = handle.await {
                warn!("Echo task failed: {}", e);
            }
        }

        // Let the printer drain the last update and hand the writer back
        let _ = shutdown_tx.send(());
        printer
            .await
            .map_err(|e| anyhow!("Render task failed: {}", e))?
    }
}

/// Print the exchange each time a new completion is stored.
async fn print_results<W: Write>(
    renderer: Arc<dyn Renderer + Send + Sync>,
    mut updates: watch::Receiver<EchoExchange>,
    mut out: W,
    mut shutdown: oneshot::Receiver<()>,
) -> Result<W> {
    let mut printed = updates.borrow().resolutions;

    loop {
        let closing = tokio::select! {
            changed = updates.changed() => changed.is_err(),
            _ = &mut shutdown => true,
        };

        let exchange = updates.borrow_and_update().clone();
        if exchange.resolutions > printed {
            printed = exchange.resolutions;
            let rendered = renderer.render_exchange(&exchange)?;
            writeln!(out, "{}", rendered)?;
            out.flush()?;
        }

        if closing {
            return Ok(out);
        }
    }
}
