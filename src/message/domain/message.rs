//! The immutable message envelope.
//!
//! Messages are never modified after construction. Derived messages are
//! produced with [`Message::derive`], which copies the headers and payload
//! into a fresh builder so individual fields can be overridden.

use super::{CorrelationId, ErrorPayload, MessageHeaders, MessageId, Payload, SequenceDetails};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A message flowing through channels.
///
/// # Invariants
///
/// - `id` is unique per constructed message, including derived messages
/// - `headers.timestamp` is taken from the clock at build time
/// - Messages cannot be modified after creation
///
/// # Examples
///
/// ```
/// use switchyard::message::domain::{CorrelationId, Message, Payload, SequenceDetails};
/// use mockable::DefaultClock;
///
/// let clock = DefaultClock;
/// let message = Message::builder(Payload::text("hello"))
///     .with_correlation_id(CorrelationId::new("greeting"))
///     .with_sequence(SequenceDetails::new(1, 2).expect("valid sequence"))
///     .build(&clock);
///
/// assert_eq!(message.payload().as_text(), Some("hello"));
/// assert_eq!(message.sequence().map(|s| s.size()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    payload: Payload,
    headers: MessageHeaders,
}

impl Message {
    /// Creates a message with no correlation or sequence headers.
    #[must_use]
    pub fn new(payload: Payload, clock: &impl Clock) -> Self {
        MessageBuilder::new(payload).build(clock)
    }

    /// Returns a builder for a new message carrying `payload`.
    #[must_use]
    pub fn builder(payload: Payload) -> MessageBuilder {
        MessageBuilder::new(payload)
    }

    /// Creates an error message wrapping a terminal failure.
    ///
    /// The failed message, when known, is attached to the payload and its
    /// correlation identifier is carried over so error flows can be joined
    /// back to the original unit of work.
    #[must_use]
    pub fn error(
        failure: &(dyn std::error::Error + Send + Sync),
        failed_message: Option<Self>,
        clock: &impl Clock,
    ) -> Self {
        let correlation_id = failed_message
            .as_ref()
            .and_then(|failed| failed.correlation_id().cloned());
        let payload = Payload::Error(ErrorPayload::new(failure.to_string(), failed_message));
        let mut builder = MessageBuilder::new(payload);
        builder.correlation_id = correlation_id;
        builder.build(clock)
    }

    /// Returns a builder pre-populated with this message's payload and
    /// headers. The built message receives a new identifier and timestamp.
    #[must_use]
    pub fn derive(&self) -> MessageBuilder {
        MessageBuilder {
            id: None,
            payload: self.payload.clone(),
            correlation_id: self.headers.correlation_id().cloned(),
            sequence: self.headers.sequence(),
            custom: self.headers.custom().clone(),
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the payload.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the headers.
    #[must_use]
    pub const fn headers(&self) -> &MessageHeaders {
        &self.headers
    }

    /// Returns the correlation identifier header, if any.
    #[must_use]
    pub const fn correlation_id(&self) -> Option<&CorrelationId> {
        self.headers.correlation_id()
    }

    /// Returns the sequence headers, if any.
    #[must_use]
    pub const fn sequence(&self) -> Option<SequenceDetails> {
        self.headers.sequence()
    }
}

/// Builder for messages.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    id: Option<MessageId>,
    payload: Payload,
    correlation_id: Option<CorrelationId>,
    sequence: Option<SequenceDetails>,
    custom: BTreeMap<String, Value>,
}

impl MessageBuilder {
    /// Creates a builder for a message carrying `payload`.
    #[must_use]
    pub const fn new(payload: Payload) -> Self {
        Self {
            id: None,
            payload,
            correlation_id: None,
            sequence: None,
            custom: BTreeMap::new(),
        }
    }

    /// Sets a specific message ID.
    #[must_use]
    pub fn with_id(mut self, id: MessageId) -> Self {
        self.id = Some(id);
        self
    }

    /// Replaces the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Sets the correlation identifier.
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Sets the sequence headers.
    #[must_use]
    pub fn with_sequence(mut self, sequence: SequenceDetails) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Removes the sequence headers.
    #[must_use]
    pub fn without_sequence(mut self) -> Self {
        self.sequence = None;
        self
    }

    /// Sets a custom header, replacing any previous value for the key.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }

    /// Removes a custom header.
    #[must_use]
    pub fn without_header(mut self, key: &str) -> Self {
        self.custom.remove(key);
        self
    }

    /// Builds the message, stamping it with the clock's current time.
    #[must_use]
    pub fn build(self, clock: &impl Clock) -> Message {
        Message {
            id: self.id.unwrap_or_default(),
            payload: self.payload,
            headers: MessageHeaders::from_parts(
                self.correlation_id,
                self.sequence,
                clock.utc(),
                self.custom,
            ),
        }
    }
}
