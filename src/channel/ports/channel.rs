//! Channel contracts.

use crate::channel::error::ChannelResult;
use crate::message::domain::Message;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// A named conduit that accepts messages.
#[async_trait]
pub trait MessageChannel: Send + Sync {
    /// Returns the channel name.
    fn name(&self) -> &str;

    /// Sends a message, waiting at most `timeout` for room (`None` waits
    /// indefinitely). Channels without a buffer dispatch directly and
    /// never wait, so they ignore `timeout`.
    ///
    /// Returns `Ok(false)` when the message was not sent and the channel's
    /// policy treats that as a soft outcome.
    ///
    /// # Errors
    ///
    /// Returns [`crate::channel::error::ChannelError`] on terminal delivery
    /// failure.
    async fn send(&self, message: Message, timeout: Option<Duration>) -> ChannelResult<bool>;
}

/// A channel that buffers messages until a consumer polls for them.
#[async_trait]
pub trait PollableChannel: MessageChannel {
    /// Receives the next message, waiting at most `timeout` (`None` waits
    /// indefinitely). Returns `Ok(None)` when the wait elapsed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::channel::error::ChannelError::Closed`] when the
    /// channel can no longer produce messages.
    async fn receive(&self, timeout: Option<Duration>) -> ChannelResult<Option<Message>>;
}

/// Looks channels up by name.
pub trait ChannelResolver: Send + Sync {
    /// Returns the channel registered under `name`, if any.
    fn resolve(&self, name: &str) -> Option<Arc<dyn MessageChannel>>;
}
