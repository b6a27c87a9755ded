//! Handler forwarding messages into another channel.

use crate::channel::{
    domain::HandlerOutcome,
    error::HandlerFailure,
    ports::{MessageChannel, MessageHandler},
};
use crate::message::domain::Message;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Connects two channels: every message it handles is sent onwards.
///
/// A send that reports "not sent" becomes a rejection; a send that fails
/// terminally becomes a handler failure.
pub struct ChannelBridge {
    name: String,
    target: Arc<dyn MessageChannel>,
    send_timeout: Option<Duration>,
}

impl ChannelBridge {
    /// Creates a bridge into `target`.
    #[must_use]
    pub fn new(target: Arc<dyn MessageChannel>) -> Self {
        Self {
            name: format!("bridge-to-{}", target.name()),
            target,
            send_timeout: None,
        }
    }

    /// Bounds how long each forward may wait.
    #[must_use]
    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl MessageHandler for ChannelBridge {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, message: &Message) -> HandlerOutcome {
        match self.target.send(message.clone(), self.send_timeout).await {
            Ok(true) => HandlerOutcome::Accepted,
            Ok(false) => {
                HandlerOutcome::rejected(format!("channel '{}' did not accept", self.target.name()))
            }
            Err(err) => HandlerOutcome::Failed(HandlerFailure::new(err)),
        }
    }
}
