//! Shared barrier contract.

use crate::message::domain::{CorrelationId, Message};
use chrono::{DateTime, Utc};

/// A stateful buffer for one correlation group.
pub trait CorrelationBarrier: Send + Sync {
    /// Returns the group key.
    fn correlation_id(&self) -> &CorrelationId;

    /// Returns when the barrier was created, used for stale-group expiry.
    fn created_at(&self) -> DateTime<Utc>;

    /// Buffers `message` and returns whatever the arrival releases.
    ///
    /// Returns `None` when nothing is released. A given message is
    /// released at most once over the barrier's lifetime.
    fn add_and_release(&self, message: Message) -> Option<Vec<Message>>;

    /// Returns `true` once the barrier will release nothing further.
    fn is_complete(&self) -> bool;

    /// Returns a copy of the messages still buffered.
    fn buffered(&self) -> Vec<Message>;

    /// Removes and returns the buffered messages, closing the barrier so
    /// later arrivals are dropped.
    fn drain(&self) -> Vec<Message>;
}
