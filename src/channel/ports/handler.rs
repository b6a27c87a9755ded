//! Message handler contract.

use crate::channel::domain::HandlerOutcome;
use crate::message::domain::Message;
use async_trait::async_trait;

/// An endpoint subscribed to a channel.
///
/// Handlers report transient capacity exhaustion as
/// [`HandlerOutcome::Rejected`], which the dispatcher may retry, and
/// unrecoverable problems as [`HandlerOutcome::Failed`].
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Returns a name identifying the handler in logs and errors.
    fn name(&self) -> &str;

    /// Offers a message to the handler.
    async fn handle(&self, message: &Message) -> HandlerOutcome;

    /// Returns `false` while the handler is stopped. Dispatchers skip
    /// inactive handlers entirely.
    fn is_active(&self) -> bool {
        true
    }
}
