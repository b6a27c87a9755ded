//! Strategies reading the well-known message headers.

use crate::correlation::ports::{CorrelationStrategy, SequenceStrategy};
use crate::message::domain::{CorrelationId, Message, SequenceDetails};

/// Groups messages by their correlation id header.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderCorrelationStrategy;

impl CorrelationStrategy for HeaderCorrelationStrategy {
    fn correlation_key(&self, message: &Message) -> Option<CorrelationId> {
        message.correlation_id().cloned()
    }
}

/// Orders messages by their sequence number and size headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderSequenceStrategy;

impl SequenceStrategy for HeaderSequenceStrategy {
    fn sequence_details(&self, message: &Message) -> Option<SequenceDetails> {
        message.sequence()
    }
}
