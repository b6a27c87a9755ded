//! Endpoint correlating inbound messages through barriers.

use super::BarrierRegistry;
use crate::channel::{
    domain::HandlerOutcome,
    error::HandlerFailure,
    ports::{MessageChannel, MessageHandler},
};
use crate::correlation::{
    adapters::{HeaderCorrelationStrategy, HeaderSequenceStrategy, ListAggregator, PassThrough},
    domain::{AggregationBarrier, CorrelationBarrier, ResequencingBarrier},
    error::CorrelationError,
    ports::{CompletionStrategy, CorrelationStrategy, ReleaseProcessor, SequenceStrategy},
};
use crate::message::domain::{CorrelationId, Message};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

enum BarrierKind {
    Aggregation {
        completion: Arc<dyn CompletionStrategy>,
    },
    Resequencing {
        release_partial: bool,
    },
}

/// A message handler that buffers messages in per-group barriers and sends
/// released groups to an output channel.
///
/// Built either as an aggregator, which releases whole groups once a
/// [`CompletionStrategy`] holds, or as a resequencer, which releases
/// messages in sequence order.
///
/// A group leaves the registry as soon as it completes: an aggregator's
/// once it has released, a resequencer's once the last element of the
/// sequence has been forwarded. Its key is remembered in a bounded set so
/// late arrivals are recognised and dropped.
/// [`Self::expire_groups_on_completion`] skips that memory, letting the key
/// open a new group, and [`Self::expire_groups`] evicts groups that have
/// been open too long.
pub struct CorrelationHandler<C>
where
    C: Clock + Send + Sync + 'static,
{
    name: String,
    kind: BarrierKind,
    correlation: Arc<dyn CorrelationStrategy>,
    sequence: Arc<dyn SequenceStrategy>,
    processor: Arc<dyn ReleaseProcessor>,
    output: Arc<dyn MessageChannel>,
    discard: Option<Arc<dyn MessageChannel>>,
    send_timeout: Option<Duration>,
    expire_on_completion: bool,
    registry: BarrierRegistry,
    clock: Arc<C>,
}

impl<C> CorrelationHandler<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates an aggregator merging each completed group into a single
    /// list message.
    #[must_use]
    pub fn aggregator(
        name: impl Into<String>,
        output: Arc<dyn MessageChannel>,
        completion: Arc<dyn CompletionStrategy>,
        clock: Arc<C>,
    ) -> Self {
        let processor = Arc::new(ListAggregator::new(Arc::clone(&clock)));
        Self::with_kind(
            name.into(),
            BarrierKind::Aggregation { completion },
            processor,
            output,
            clock,
        )
    }

    /// Creates a resequencer forwarding messages in sequence order.
    ///
    /// With `release_partial`, contiguous runs are forwarded as soon as they
    /// form; otherwise a sequence is held back until it is whole.
    #[must_use]
    pub fn resequencer(
        name: impl Into<String>,
        output: Arc<dyn MessageChannel>,
        release_partial: bool,
        clock: Arc<C>,
    ) -> Self {
        Self::with_kind(
            name.into(),
            BarrierKind::Resequencing { release_partial },
            Arc::new(PassThrough),
            output,
            clock,
        )
    }

    fn with_kind(
        name: String,
        kind: BarrierKind,
        processor: Arc<dyn ReleaseProcessor>,
        output: Arc<dyn MessageChannel>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            name,
            kind,
            correlation: Arc::new(HeaderCorrelationStrategy),
            sequence: Arc::new(HeaderSequenceStrategy),
            processor,
            output,
            discard: None,
            send_timeout: None,
            expire_on_completion: false,
            registry: BarrierRegistry::new(),
            clock,
        }
    }

    /// Replaces the header-based correlation strategy.
    #[must_use]
    pub fn with_correlation_strategy(mut self, strategy: Arc<dyn CorrelationStrategy>) -> Self {
        self.correlation = strategy;
        self
    }

    /// Replaces the header-based sequence strategy used by resequencers.
    #[must_use]
    pub fn with_sequence_strategy(mut self, strategy: Arc<dyn SequenceStrategy>) -> Self {
        self.sequence = strategy;
        self
    }

    /// Replaces the release processor.
    #[must_use]
    pub fn with_release_processor(mut self, processor: Arc<dyn ReleaseProcessor>) -> Self {
        self.processor = processor;
        self
    }

    /// Forwards the buffered messages of expired groups to `channel`.
    #[must_use]
    pub fn with_discard_channel(mut self, channel: Arc<dyn MessageChannel>) -> Self {
        self.discard = Some(channel);
        self
    }

    /// Bounds how long output and discard sends may wait.
    #[must_use]
    pub const fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = Some(timeout);
        self
    }

    /// Forgets a group's key as soon as it completes.
    ///
    /// A message arriving afterwards with the same key opens a new group
    /// instead of being dropped as a late arrival.
    #[must_use]
    pub const fn expire_groups_on_completion(mut self, expire: bool) -> Self {
        self.expire_on_completion = expire;
        self
    }

    /// Sets how many completed keys are remembered for late-arrival
    /// detection. The oldest key is forgotten first.
    #[must_use]
    pub fn with_completed_key_capacity(mut self, capacity: usize) -> Self {
        self.registry = BarrierRegistry::with_completed_capacity(capacity);
        self
    }

    /// Returns the registry of open groups.
    #[must_use]
    pub const fn registry(&self) -> &BarrierRegistry {
        &self.registry
    }

    /// Evicts every group created more than `max_age` ago.
    ///
    /// Returns the messages still buffered in the evicted groups, after
    /// forwarding them to the discard channel when one is configured.
    pub async fn expire_groups(&self, max_age: chrono::Duration) -> Vec<Message> {
        let cutoff = self.clock.utc() - max_age;
        let mut discarded = Vec::new();
        for barrier in self.registry.remove_created_before(cutoff) {
            let buffered = barrier.drain();
            info!(
                handler = %self.name,
                correlation_id = %barrier.correlation_id(),
                discarded = buffered.len(),
                "expired correlation group"
            );
            discarded.extend(buffered);
        }

        if let Some(discard) = &self.discard {
            for message in &discarded {
                match discard.send(message.clone(), self.send_timeout).await {
                    Ok(true) => {}
                    Ok(false) => warn!(
                        handler = %self.name,
                        discard_channel = discard.name(),
                        message_id = %message.id(),
                        "discard channel did not accept expired message"
                    ),
                    Err(err) => warn!(
                        handler = %self.name,
                        discard_channel = discard.name(),
                        message_id = %message.id(),
                        error = %err,
                        "failed to forward expired message"
                    ),
                }
            }
        }
        discarded
    }

    fn create_barrier(&self, key: &CorrelationId) -> Arc<dyn CorrelationBarrier> {
        let created_at = self.clock.utc();
        debug!(handler = %self.name, correlation_id = %key, "opening correlation group");
        match &self.kind {
            BarrierKind::Aggregation { completion } => Arc::new(AggregationBarrier::new(
                key.clone(),
                Arc::clone(completion),
                created_at,
            )),
            BarrierKind::Resequencing { release_partial } => Arc::new(ResequencingBarrier::new(
                key.clone(),
                Arc::clone(&self.sequence),
                *release_partial,
                created_at,
            )),
        }
    }

    async fn correlate(&self, message: &Message) -> Result<(), CorrelationError> {
        let key = self.correlation.correlation_key(message).ok_or(
            CorrelationError::MissingCorrelationKey {
                message_id: message.id(),
            },
        )?;
        if matches!(self.kind, BarrierKind::Resequencing { .. })
            && self.sequence.sequence_details(message).is_none()
        {
            return Err(CorrelationError::MissingSequence {
                message_id: message.id(),
            });
        }

        let Some(barrier) = self
            .registry
            .get_or_create(&key, || self.create_barrier(&key))
        else {
            debug!(
                handler = %self.name,
                correlation_id = %key,
                message_id = %message.id(),
                "dropping late arrival for completed group"
            );
            return Ok(());
        };

        let released = barrier.add_and_release(message.clone());
        if barrier.is_complete() {
            self.release_group(&key, &barrier);
        }
        if let Some(released) = released {
            self.send_released(&key, released).await?;
        }
        Ok(())
    }

    fn release_group(&self, key: &CorrelationId, barrier: &Arc<dyn CorrelationBarrier>) {
        let removed = if self.expire_on_completion {
            self.registry.remove(key, barrier)
        } else {
            self.registry.retire(key, barrier)
        };
        if removed {
            debug!(handler = %self.name, correlation_id = %key, "removed completed group");
        }
    }

    async fn send_released(
        &self,
        key: &CorrelationId,
        released: Vec<Message>,
    ) -> Result<(), CorrelationError> {
        for outbound in self.processor.process(key, released) {
            if !self.output.send(outbound, self.send_timeout).await? {
                return Err(CorrelationError::OutputRejected {
                    channel: self.output.name().to_owned(),
                    correlation_id: key.clone(),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<C> MessageHandler for CorrelationHandler<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, message: &Message) -> HandlerOutcome {
        match self.correlate(message).await {
            Ok(()) => HandlerOutcome::Accepted,
            Err(err) => {
                warn!(
                    handler = %self.name,
                    message_id = %message.id(),
                    error = %err,
                    "correlation failed"
                );
                HandlerOutcome::Failed(HandlerFailure::new(err))
            }
        }
    }
}
