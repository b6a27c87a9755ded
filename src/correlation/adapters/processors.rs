//! Stock release processors.

use crate::correlation::ports::ReleaseProcessor;
use crate::message::domain::{CorrelationId, Message, Payload};
use mockable::Clock;
use std::sync::Arc;

/// Forwards released messages unchanged. The resequencer default.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl ReleaseProcessor for PassThrough {
    fn process(&self, _correlation_id: &CorrelationId, released: Vec<Message>) -> Vec<Message> {
        released
    }
}

/// Merges a released group into one message carrying a
/// [`Payload::List`] of the group's payloads in arrival order.
///
/// Headers are copied from the first message, minus its sequence headers,
/// and the correlation id is set to the group key.
pub struct ListAggregator<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
}

impl<C> ListAggregator<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an aggregator stamping output with `clock`.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self { clock }
    }
}

impl<C> ReleaseProcessor for ListAggregator<C>
where
    C: Clock + Send + Sync,
{
    fn process(&self, correlation_id: &CorrelationId, released: Vec<Message>) -> Vec<Message> {
        let Some(first) = released.first() else {
            return Vec::new();
        };
        let builder = first.derive().without_sequence();
        let payloads = released
            .into_iter()
            .map(|message| message.payload().clone())
            .collect();
        vec![
            builder
                .with_payload(Payload::List(payloads))
                .with_correlation_id(correlation_id.clone())
                .build(&*self.clock),
        ]
    }
}
