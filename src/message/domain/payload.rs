//! Message payloads.
//!
//! The runtime treats payloads as opaque; the variants exist so routers can
//! key on the payload kind and so aggregators and error publishers can build
//! composite payloads without a serialisation round trip.

use super::Message;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Body of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// Plain text.
    Text(String),
    /// Structured JSON document.
    Json(Value),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Ordered collection of payloads, typically produced by aggregation.
    List(Vec<Self>),
    /// A terminal failure published to an error channel.
    Error(ErrorPayload),
}

impl Payload {
    /// Creates a text payload.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the discriminating kind of this payload.
    #[must_use]
    pub const fn kind(&self) -> PayloadKind {
        match self {
            Self::Text(_) => PayloadKind::Text,
            Self::Json(_) => PayloadKind::Json,
            Self::Bytes(_) => PayloadKind::Bytes,
            Self::List(_) => PayloadKind::List,
            Self::Error(_) => PayloadKind::Error,
        }
    }

    /// Returns the text when this is a text payload.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the items when this is a list payload.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the error details when this is an error payload.
    #[must_use]
    pub const fn as_error(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }
}

/// Payload discriminant used for type-keyed routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// [`Payload::Text`].
    Text,
    /// [`Payload::Json`].
    Json,
    /// [`Payload::Bytes`].
    Bytes,
    /// [`Payload::List`].
    List,
    /// [`Payload::Error`].
    Error,
}

impl PayloadKind {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Bytes => "bytes",
            Self::List => "list",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of an error message: the failure plus the message that caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    description: String,
    failed_message: Option<Box<Message>>,
}

impl ErrorPayload {
    /// Creates an error payload from a failure description.
    #[must_use]
    pub fn new(description: impl Into<String>, failed_message: Option<Message>) -> Self {
        Self {
            description: description.into(),
            failed_message: failed_message.map(Box::new),
        }
    }

    /// Returns the rendered failure.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the message whose processing failed, if known.
    #[must_use]
    pub fn failed_message(&self) -> Option<&Message> {
        self.failed_message.as_deref()
    }
}
