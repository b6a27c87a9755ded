//! Errors raised while constructing message values.

use thiserror::Error;

/// Errors that can occur while building message headers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Sequence headers are not 1-based or exceed the group size.
    #[error("invalid sequence {number} of {size}: numbers are 1-based and bounded by the size")]
    InvalidSequence {
        /// The offending sequence number.
        number: u32,
        /// The offending sequence size.
        size: u32,
    },
}
