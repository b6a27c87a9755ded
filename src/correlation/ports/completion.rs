//! Group completion predicate.

use crate::message::domain::Message;

/// Decides whether an aggregation group is complete.
///
/// Evaluated after every insertion, under the barrier's lock, with the
/// messages buffered so far in arrival order. Implementations must be
/// deterministic for a given input.
///
/// # Examples
///
/// ```
/// use switchyard::correlation::ports::CompletionStrategy;
/// use switchyard::message::domain::Message;
///
/// let pair = |messages: &[Message]| messages.len() == 2;
/// assert!(!pair.is_complete(&[]));
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait CompletionStrategy: Send + Sync {
    /// Returns `true` once the group should be released.
    fn is_complete(&self, messages: &[Message]) -> bool;
}

impl<F> CompletionStrategy for F
where
    F: Fn(&[Message]) -> bool + Send + Sync,
{
    fn is_complete(&self, messages: &[Message]) -> bool {
        self(messages)
    }
}
