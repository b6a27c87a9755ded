//! Stock completion strategies.

use crate::correlation::ports::CompletionStrategy;
use crate::message::domain::Message;
use std::num::NonZeroUsize;

/// Complete once the group holds as many messages as the sequence size
/// header of its first message announces.
///
/// Groups whose first message carries no sequence header never complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceSizeCompletion;

impl CompletionStrategy for SequenceSizeCompletion {
    fn is_complete(&self, messages: &[Message]) -> bool {
        messages
            .first()
            .and_then(Message::sequence)
            .and_then(|sequence| usize::try_from(sequence.size()).ok())
            .is_some_and(|size| messages.len() >= size)
    }
}

/// Complete once the group holds a fixed number of messages.
#[derive(Debug, Clone, Copy)]
pub struct CountCompletion {
    threshold: NonZeroUsize,
}

impl CountCompletion {
    /// Creates a strategy completing at `threshold` messages. A threshold
    /// of zero is treated as one.
    #[must_use]
    pub const fn new(threshold: usize) -> Self {
        let threshold = match NonZeroUsize::new(threshold) {
            Some(value) => value,
            None => NonZeroUsize::MIN,
        };
        Self { threshold }
    }

    /// Returns the number of messages that completes a group.
    #[must_use]
    pub const fn threshold(&self) -> usize {
        self.threshold.get()
    }
}

impl CompletionStrategy for CountCompletion {
    fn is_complete(&self, messages: &[Message]) -> bool {
        messages.len() >= self.threshold.get()
    }
}
