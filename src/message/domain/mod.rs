//! Domain types for the message envelope.
//!
//! All types are immutable after construction and serialisable via serde.

mod headers;
mod ids;
mod message;
mod payload;

pub use headers::{MessageHeaders, SequenceDetails};
pub use ids::{CorrelationId, MessageId};
pub use message::{Message, MessageBuilder};
pub use payload::{ErrorPayload, Payload, PayloadKind};
