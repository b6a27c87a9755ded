//! Unit tests for the correlation module.


use crate::message::domain::{CorrelationId, Message, Payload, SequenceDetails};
use mockable::DefaultClock;

/// Builds a text message in group `key` at position `number` of `size`.
fn sequenced(key: &str, number: u32, size: u32) -> Message {
    Message::builder(Payload::text(format!("{key}-{number}")))
        .with_correlation_id(CorrelationId::new(key))
        .with_sequence(SequenceDetails::new(number, size).expect("valid sequence"))
        .build(&DefaultClock)
}

/// Builds a text message in group `key` without sequence headers.
fn correlated(key: &str, text: &str) -> Message {
    Message::builder(Payload::text(text))
        .with_correlation_id(CorrelationId::new(key))
        .build(&DefaultClock)
}

fn sequence_numbers(messages: &[Message]) -> Vec<u32> {
    messages
        .iter()
        .filter_map(Message::sequence)
        .map(|sequence| sequence.number())
        .collect()
}
