//! Errors raised by correlation handlers.

use crate::channel::error::ChannelError;
use crate::message::domain::{CorrelationId, MessageId};
use thiserror::Error;

/// Terminal failures while correlating or releasing a group.
#[derive(Debug, Clone, Error)]
pub enum CorrelationError {
    /// The correlation strategy produced no key for the message.
    #[error("message {message_id} carries no correlation key")]
    MissingCorrelationKey {
        /// Identifier of the offending message.
        message_id: MessageId,
    },

    /// A resequencer received a message without sequence details.
    #[error("message {message_id} carries no sequence details")]
    MissingSequence {
        /// Identifier of the offending message.
        message_id: MessageId,
    },

    /// The output channel refused a released message.
    #[error("output channel '{channel}' refused released group '{correlation_id}'")]
    OutputRejected {
        /// Output channel name.
        channel: String,
        /// Group whose output was refused.
        correlation_id: CorrelationId,
    },

    /// The output channel failed terminally.
    #[error(transparent)]
    Output(#[from] ChannelError),
}
