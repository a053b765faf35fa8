//! Form state for the echo client.
//!
//! The form owns one `EchoExchange`, binds its input, and resolves each
//! submission through an `EchoTransport` on a spawned task. Observers follow
//! the exchange through a watch channel.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::exchange::EchoExchange;
use crate::transport::EchoTransport;

/// How completions of overlapping submissions are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolvePolicy {
    /// Every completion is stored; whichever resolves last is displayed.
    #[default]
    LastResolved,

    /// Only the completion of the most recent submission is stored.
    LatestSubmitted,
}

/// A single echo form.
#[derive(Clone)]
pub struct EchoForm {
    transport: Arc<dyn EchoTransport>,
    state: Arc<watch::Sender<EchoExchange>>,
    policy: ResolvePolicy,
}

impl EchoForm {
    /// Mount a form with an empty exchange.
    pub fn new(transport: Arc<dyn EchoTransport>) -> Self {
        Self::with_policy(transport, ResolvePolicy::default())
    }

    /// Mount a form that applies completions according to `policy`.
    pub fn with_policy(transport: Arc<dyn EchoTransport>, policy: ResolvePolicy) -> Self {
        let (state, _) = watch::channel(EchoExchange::default());
        Self {
            transport,
            state: Arc::new(state),
            policy,
        }
    }

    pub fn policy(&self) -> ResolvePolicy {
        self.policy
    }

    /// Replace the text in the input.
    pub fn set_message(&self, message: impl Into<String>) {
        let message = message.into();
        self.state
            .send_modify(|exchange| exchange.outgoing_message = message);
    }

    /// Current text in the input.
    pub fn message(&self) -> String {
        self.state.borrow().outgoing_message.clone()
    }

    /// Copy of the current exchange.
    pub fn snapshot(&self) -> EchoExchange {
        self.state.borrow().clone()
    }

    /// Observe every change to the exchange.
    pub fn subscribe(&self) -> watch::Receiver<EchoExchange> {
        self.state.subscribe()
    }

    /// Type `message` into the input and submit it.
    pub fn submit_message(&self, message: impl Into<String>) -> JoinHandle<()> {
        self.set_message(message);
        self.submit()
    }

    /// Submit the current input.
    ///
    /// Both payloads are cleared before this returns. The request runs on a
    /// spawned task whose completion stores exactly one payload; awaiting the
    /// returned handle is optional. Must be called within a Tokio runtime.
    pub fn submit(&self) -> JoinHandle<()> {
        // Clear the previous result and capture what was typed
        let mut message = String::new();
        let mut generation = 0;
        self.state.send_modify(|exchange| {
            generation = exchange.begin_attempt();
            message = exchange.outgoing_message.clone();
        });

        debug!(generation, "Submitting echo message ({} bytes)", message.len());

        let transport = self.transport.clone();
        let state = self.state.clone();
        let policy = self.policy;

        // Resolve on a separate task so the caller never waits
        tokio::spawn(async move {
            let outcome = transport.send_echo(&message).await;

            match &outcome {
                Ok(_) => debug!(generation, "Echo request resolved"),
                Err(e) => debug!(generation, "Echo request failed: {}", e),
            }

            // Store the outcome unless the policy says it is stale
            state.send_if_modified(|exchange| {
                if policy == ResolvePolicy::LatestSubmitted && exchange.generation != generation {
                    debug!(
                        generation,
                        latest = exchange.generation,
                        "Dropping stale echo result"
                    );
                    return false;
                }
                exchange.resolve(outcome);
                true
            });
        })
    }
}
