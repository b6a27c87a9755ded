//! Error types for channel dispatch and channel configuration.
//!
//! Transient rejections never appear here; they are absorbed by the
//! dispatcher's retry loop. Only exhaustion and terminal failures surface.

use std::sync::Arc;
use thiserror::Error;

/// A terminal failure reported by a message handler.
///
/// Wraps the underlying cause in an `Arc` so outcomes stay cheap to clone.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct HandlerFailure(Arc<dyn std::error::Error + Send + Sync>);

impl HandlerFailure {
    /// Wraps any error as a handler failure.
    #[must_use]
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }

    /// Creates a handler failure from a plain description.
    #[must_use]
    pub fn message(description: impl Into<String>) -> Self {
        Self::new(std::io::Error::other(description.into()))
    }
}

/// Terminal delivery failures raised by a dispatcher.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// The channel has no subscriptions at all.
    #[error("channel '{channel}' has no subscribers")]
    NoSubscribers {
        /// Channel name.
        channel: String,
    },

    /// Every eligible handler kept rejecting until its retries ran out.
    #[error(
        "channel '{channel}' could not deliver to all targets: rejection limit reached for [{}]",
        .exhausted.join(", ")
    )]
    RejectionLimitExceeded {
        /// Channel name.
        channel: String,
        /// Names of the handlers that exhausted their retries.
        exhausted: Vec<String>,
    },

    /// A handler failed terminally.
    #[error("handler '{handler}' on channel '{channel}' failed: {source}")]
    HandlerFailed {
        /// Channel name.
        channel: String,
        /// Handler name.
        handler: String,
        /// The handler's failure.
        source: HandlerFailure,
    },
}

/// Errors surfaced by channel operations.
#[derive(Debug, Clone, Error)]
pub enum ChannelError {
    /// Dispatch to the channel's subscribers failed terminally.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// The channel can no longer carry messages.
    #[error("channel '{0}' is closed")]
    Closed(String),
}

/// Result type for channel operations.
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Invalid channel or executor configuration, detected at setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelConfigError {
    /// A queue channel needs room for at least one message.
    #[error("queue channel '{0}' must have a capacity of at least one")]
    ZeroCapacity(String),

    /// A bounded executor needs at least one permit.
    #[error("executor '{0}' must allow at least one concurrent task")]
    ZeroConcurrency(String),

    /// A channel with this name is already registered.
    #[error("duplicate channel name: {0}")]
    DuplicateChannel(String),
}
