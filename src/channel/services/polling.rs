//! Polling consumer draining a pollable channel into a handler.

use super::ErrorPublisher;
use crate::channel::{
    domain::HandlerOutcome,
    error::ChannelResult,
    ports::{MessageHandler, PollableChannel},
};
use crate::message::domain::Message;
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

const DEFAULT_RECEIVE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Endpoint that repeatedly receives from a [`PollableChannel`] and offers
/// each message to a handler.
///
/// Terminal handler failures have no caller to return to, so they are
/// published to the error channel with the failed message attached.
/// Rejections are logged and the message is dropped.
pub struct PollingConsumer<C>
where
    C: Clock + Send + Sync,
{
    source: Arc<dyn PollableChannel>,
    handler: Arc<dyn MessageHandler>,
    errors: ErrorPublisher<C>,
    receive_timeout: Duration,
}

impl<C> PollingConsumer<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a consumer polling `source` on behalf of `handler`.
    #[must_use]
    pub const fn new(
        source: Arc<dyn PollableChannel>,
        handler: Arc<dyn MessageHandler>,
        errors: ErrorPublisher<C>,
    ) -> Self {
        Self {
            source,
            handler,
            errors,
            receive_timeout: DEFAULT_RECEIVE_TIMEOUT,
        }
    }

    /// Sets how long each poll waits for a message.
    #[must_use]
    pub const fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = timeout;
        self
    }

    /// Receives and processes at most one message.
    ///
    /// Returns `Ok(false)` when no message arrived within the receive
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`crate::channel::error::ChannelError`] when the source
    /// channel fails.
    pub async fn poll_once(&self) -> ChannelResult<bool> {
        let Some(message) = self.source.receive(Some(self.receive_timeout)).await? else {
            return Ok(false);
        };
        self.process(message).await;
        Ok(true)
    }

    async fn process(&self, message: Message) {
        match self.handler.handle(&message).await {
            HandlerOutcome::Accepted => {}
            HandlerOutcome::Rejected { reason } => {
                warn!(
                    source = self.source.name(),
                    handler = self.handler.name(),
                    message_id = %message.id(),
                    reason = %reason,
                    "polled message rejected, dropping"
                );
            }
            HandlerOutcome::Failed(failure) => {
                self.errors.publish(&failure, Some(message)).await;
            }
        }
    }

    /// Polls until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// Shutdown only interrupts the wait for a message. A message already
    /// taken from the source is handled to completion, including error
    /// publication, before the loop observes the signal.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            source = self.source.name(),
            handler = self.handler.name(),
            "polling consumer started"
        );
        loop {
            if *shutdown.borrow_and_update() {
                break;
            }
            let received = tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }

                received = self.source.receive(Some(self.receive_timeout)) => received,
            };
            match received {
                Ok(Some(message)) => self.process(message).await,
                Ok(None) => {}
                Err(err) => {
                    warn!(source = self.source.name(), error = %err, "poll failed");
                    break;
                }
            }
        }
        debug!(source = self.source.name(), "polling consumer stopped");
    }
}
