//! Barrier releasing messages in ascending sequence order.

use super::CorrelationBarrier;
use crate::correlation::ports::SequenceStrategy;
use crate::message::domain::{CorrelationId, Message, SequenceDetails};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

struct Entry {
    sequence: SequenceDetails,
    message: Message,
}

#[derive(Default)]
struct ResequencingState {
    // Sorted ascending by sequence number; equal numbers keep arrival order.
    buffer: Vec<Entry>,
    last_released: u32,
    complete: bool,
}

impl ResequencingState {
    fn insert(&mut self, entry: Entry) {
        let number = entry.sequence.number();
        let index = self
            .buffer
            .partition_point(|existing| existing.sequence.number() <= number);
        self.buffer.insert(index, entry);
    }

    fn has_received_all_messages(&self) -> bool {
        let (Some(first), Some(last)) = (self.buffer.first(), self.buffer.last()) else {
            return false;
        };
        let first = first.sequence.number();
        let last_sequence = last.sequence;
        let span = last_sequence.number() - first + 1;
        last_sequence.is_last()
            && usize::try_from(span).is_ok_and(|span| span == self.buffer.len())
            && first == self.last_released + 1
    }

    fn release_available(&mut self, release_partial: bool) -> Vec<Message> {
        if !release_partial && !self.has_received_all_messages() {
            return Vec::new();
        }

        let mut released = Vec::new();
        let mut remaining = Vec::with_capacity(self.buffer.len());
        let mut releasing = true;
        for entry in std::mem::take(&mut self.buffer) {
            let number = entry.sequence.number();
            if releasing && number == self.last_released + 1 {
                self.last_released = number;
                if entry.sequence.is_last() {
                    self.complete = true;
                }
                released.push(entry.message);
            } else if number <= self.last_released {
                debug!(
                    message_id = %entry.message.id(),
                    sequence_number = number,
                    "dropping duplicate of released sequence number"
                );
            } else {
                releasing = false;
                remaining.push(entry);
            }
        }
        self.buffer = remaining;
        released
    }
}

/// Buffers messages of one sequence and releases them in order.
///
/// With `release_partial` enabled, the longest run contiguous from the last
/// released number is released on every arrival. Otherwise nothing is
/// released until the whole remainder of the sequence is present.
///
/// Messages numbered at or below the last released number are duplicates
/// and are dropped.
pub struct ResequencingBarrier {
    correlation_id: CorrelationId,
    created_at: DateTime<Utc>,
    sequence: Arc<dyn SequenceStrategy>,
    release_partial: bool,
    state: Mutex<ResequencingState>,
}

impl ResequencingBarrier {
    /// Creates an empty barrier for `correlation_id`.
    #[must_use]
    pub fn new(
        correlation_id: CorrelationId,
        sequence: Arc<dyn SequenceStrategy>,
        release_partial: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            correlation_id,
            created_at,
            sequence,
            release_partial,
            state: Mutex::new(ResequencingState::default()),
        }
    }

    /// Returns the highest sequence number released so far, zero if none.
    #[must_use]
    pub fn last_released(&self) -> u32 {
        self.state().last_released
    }

    /// Returns `true` when the buffer holds the entire unreleased remainder
    /// of the sequence.
    #[must_use]
    pub fn has_received_all_messages(&self) -> bool {
        self.state().has_received_all_messages()
    }

    fn state(&self) -> MutexGuard<'_, ResequencingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CorrelationBarrier for ResequencingBarrier {
    fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn add_and_release(&self, message: Message) -> Option<Vec<Message>> {
        let Some(sequence) = self.sequence.sequence_details(&message) else {
            debug!(
                correlation_id = %self.correlation_id,
                message_id = %message.id(),
                "dropping message without sequence details"
            );
            return None;
        };

        let mut state = self.state();
        if state.complete || sequence.number() <= state.last_released {
            debug!(
                correlation_id = %self.correlation_id,
                message_id = %message.id(),
                sequence_number = sequence.number(),
                last_released = state.last_released,
                "dropping late or duplicate arrival"
            );
            return None;
        }

        state.insert(Entry { sequence, message });
        let released = state.release_available(self.release_partial);
        if released.is_empty() {
            None
        } else {
            debug!(
                correlation_id = %self.correlation_id,
                released = released.len(),
                last_released = state.last_released,
                "released resequenced messages"
            );
            Some(released)
        }
    }

    fn is_complete(&self) -> bool {
        self.state().complete
    }

    fn buffered(&self) -> Vec<Message> {
        self.state()
            .buffer
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    fn drain(&self) -> Vec<Message> {
        let mut state = self.state();
        state.complete = true;
        std::mem::take(&mut state.buffer)
            .into_iter()
            .map(|entry| entry.message)
            .collect()
    }
}
