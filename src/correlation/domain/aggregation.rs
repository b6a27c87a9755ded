//! Barrier releasing a whole group once a completion predicate holds.

use super::CorrelationBarrier;
use crate::correlation::ports::CompletionStrategy;
use crate::message::domain::{CorrelationId, Message};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Default)]
struct AggregationState {
    messages: Vec<Message>,
    complete: bool,
}

/// Accumulates messages until its [`CompletionStrategy`] reports the group
/// complete, then releases the accumulated list exactly once.
///
/// Arrivals after completion are logged and dropped.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use chrono::Utc;
/// use mockable::DefaultClock;
/// use switchyard::correlation::adapters::CountCompletion;
/// use switchyard::correlation::domain::{AggregationBarrier, CorrelationBarrier};
/// use switchyard::message::domain::{CorrelationId, Message, Payload};
///
/// let barrier = AggregationBarrier::new(
///     CorrelationId::new("pair"),
///     Arc::new(CountCompletion::new(2)),
///     Utc::now(),
/// );
/// let message = || Message::new(Payload::text("x"), &DefaultClock);
///
/// assert!(barrier.add_and_release(message()).is_none());
/// assert_eq!(barrier.add_and_release(message()).map(|group| group.len()), Some(2));
/// assert!(barrier.add_and_release(message()).is_none());
/// ```
pub struct AggregationBarrier {
    correlation_id: CorrelationId,
    created_at: DateTime<Utc>,
    completion: Arc<dyn CompletionStrategy>,
    state: Mutex<AggregationState>,
}

impl AggregationBarrier {
    /// Creates an empty barrier for `correlation_id`.
    #[must_use]
    pub fn new(
        correlation_id: CorrelationId,
        completion: Arc<dyn CompletionStrategy>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            correlation_id,
            created_at,
            completion,
            state: Mutex::new(AggregationState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, AggregationState> {
        // Every mutation leaves the state consistent, so a poisoned lock is
        // still safe to use.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CorrelationBarrier for AggregationBarrier {
    fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn add_and_release(&self, message: Message) -> Option<Vec<Message>> {
        let mut state = self.state();
        if state.complete {
            debug!(
                correlation_id = %self.correlation_id,
                message_id = %message.id(),
                "dropping late arrival for completed group"
            );
            return None;
        }

        state.messages.push(message);
        if !self.completion.is_complete(&state.messages) {
            return None;
        }
        state.complete = true;
        debug!(
            correlation_id = %self.correlation_id,
            size = state.messages.len(),
            "aggregation group complete"
        );
        Some(std::mem::take(&mut state.messages))
    }

    fn is_complete(&self) -> bool {
        self.state().complete
    }

    fn buffered(&self) -> Vec<Message> {
        self.state().messages.clone()
    }

    fn drain(&self) -> Vec<Message> {
        let mut state = self.state();
        state.complete = true;
        std::mem::take(&mut state.messages)
    }
}
