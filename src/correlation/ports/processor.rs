//! Conversion of a released group into outbound messages.

use crate::message::domain::{CorrelationId, Message};

/// Builds the messages sent to the output channel when a group releases.
pub trait ReleaseProcessor: Send + Sync {
    /// Turns the released messages of `correlation_id` into output.
    fn process(&self, correlation_id: &CorrelationId, released: Vec<Message>) -> Vec<Message>;
}
