//! Key and sequence extraction.

use crate::message::domain::{CorrelationId, Message, SequenceDetails};

/// Derives the group key a message belongs to.
///
/// Closures of type `Fn(&Message) -> Option<CorrelationId>` are strategies.
pub trait CorrelationStrategy: Send + Sync {
    /// Returns the correlation key, or `None` when the message has none.
    fn correlation_key(&self, message: &Message) -> Option<CorrelationId>;
}

impl<F> CorrelationStrategy for F
where
    F: Fn(&Message) -> Option<CorrelationId> + Send + Sync,
{
    fn correlation_key(&self, message: &Message) -> Option<CorrelationId> {
        self(message)
    }
}

/// Reads a message's position within its group.
pub trait SequenceStrategy: Send + Sync {
    /// Returns the sequence details, or `None` when the message has none.
    fn sequence_details(&self, message: &Message) -> Option<SequenceDetails>;
}
