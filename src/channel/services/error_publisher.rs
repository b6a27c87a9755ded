//! Publication of terminal failures onto an error channel.

use crate::channel::ports::MessageChannel;
use crate::message::domain::Message;
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Wraps terminal failures in error messages and sends them to an error
/// channel.
///
/// Used wherever a failure happens away from the original caller: polling
/// consumers and bounded executors.
pub struct ErrorPublisher<C>
where
    C: Clock + Send + Sync,
{
    channel: Arc<dyn MessageChannel>,
    clock: Arc<C>,
    send_timeout: Option<Duration>,
}

impl<C> Clone for ErrorPublisher<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            channel: Arc::clone(&self.channel),
            clock: Arc::clone(&self.clock),
            send_timeout: self.send_timeout,
        }
    }
}

impl<C> ErrorPublisher<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a publisher targeting `channel`.
    #[must_use]
    pub fn new(channel: Arc<dyn MessageChannel>, clock: Arc<C>) -> Self {
        Self {
            channel,
            clock,
            send_timeout: None,
        }
    }

    /// Bounds how long publication may wait for room on the error channel.
    #[must_use]
    pub const fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = Some(timeout);
        self
    }

    /// Returns the error channel name.
    #[must_use]
    pub fn channel_name(&self) -> &str {
        self.channel.name()
    }

    /// Publishes `failure`, attaching the message whose processing failed.
    ///
    /// Returns `true` when the error channel accepted the error message.
    /// Publication problems are logged, never propagated.
    pub async fn publish(
        &self,
        failure: &(dyn std::error::Error + Send + Sync),
        failed_message: Option<Message>,
    ) -> bool {
        let failed_id = failed_message.as_ref().map(Message::id);
        let error_message = Message::error(failure, failed_message, &*self.clock);
        match self.channel.send(error_message, self.send_timeout).await {
            Ok(true) => {
                debug!(
                    error_channel = self.channel.name(),
                    failed_message_id = ?failed_id,
                    error = %failure,
                    "published error message"
                );
                true
            }
            Ok(false) => {
                warn!(
                    error_channel = self.channel.name(),
                    failed_message_id = ?failed_id,
                    error = %failure,
                    "error channel did not accept error message"
                );
                false
            }
            Err(err) => {
                warn!(
                    error_channel = self.channel.name(),
                    failed_message_id = ?failed_id,
                    error = %failure,
                    publish_error = %err,
                    "failed to publish error message"
                );
                false
            }
        }
    }
}
