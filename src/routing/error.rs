//! Error types for routers.
//!
//! [`ConfigurationError`] covers problems with how a router is set up,
//! detected either when it is built or when a strategy returns a shape
//! the router cannot interpret. [`RoutingError`] covers failures to
//! resolve or deliver one message.

use crate::channel::error::ChannelError;
use crate::message::domain::MessageId;
use thiserror::Error;

/// Invalid router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A router was given both a channel resolver and static channel
    /// mappings.
    #[error("router '{router}' cannot use both a channel resolver and static channel mappings")]
    ConflictingResolvers {
        /// Router name.
        router: String,
    },

    /// The same channel name was mapped twice.
    #[error("router '{router}' maps channel '{channel}' more than once")]
    DuplicateMapping {
        /// Router name.
        router: String,
        /// Duplicated channel name.
        channel: String,
    },

    /// A route strategy produced a value that names no channels.
    #[error("unsupported route shape: {shape}")]
    UnsupportedRouteShape {
        /// Description of the offending value.
        shape: String,
    },
}

/// Failures to route a message.
#[derive(Debug, Clone, Error)]
pub enum RoutingError {
    /// No channel was resolved and the router requires one.
    #[error("router '{router}' resolved no channel for message {message_id}")]
    ResolutionRequired {
        /// Router name.
        router: String,
        /// Identifier of the unroutable message.
        message_id: MessageId,
    },

    /// A channel name could not be resolved.
    #[error("router '{router}' could not resolve channel '{channel}'")]
    UnresolvedChannel {
        /// Router name.
        router: String,
        /// Channel name after prefix and suffix were applied.
        channel: String,
    },

    /// A resolved channel did not accept the message in time.
    #[error("channel '{channel}' did not accept message {message_id} from router '{router}'")]
    SendRejected {
        /// Router name.
        router: String,
        /// Channel name.
        channel: String,
        /// Identifier of the message.
        message_id: MessageId,
    },

    /// A resolved channel failed terminally.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// The route strategy's output could not be interpreted.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
