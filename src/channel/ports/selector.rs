//! Message selector contract.

use crate::message::domain::Message;

/// Predicate deciding whether a subscriber is interested in a message.
///
/// Any `Fn(&Message) -> bool` closure is a selector.
pub trait MessageSelector: Send + Sync {
    /// Returns `true` when the message should be offered.
    fn accept(&self, message: &Message) -> bool;
}

impl<F> MessageSelector for F
where
    F: Fn(&Message) -> bool + Send + Sync,
{
    fn accept(&self, message: &Message) -> bool {
        self(message)
    }
}
