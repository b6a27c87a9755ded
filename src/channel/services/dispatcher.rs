//! Channel-level message distribution with bounded rejection retry.
//!
//! A [`Dispatcher`] owns the ordered subscription table of one channel and
//! applies its [`DispatcherPolicy`]:
//!
//! - **Unicast**: handlers are tried in registration order until one accepts.
//! - **Broadcast**: every eligible handler gets an independent delivery.
//!
//! In both modes a handler that rejects is retried, pausing for the policy's
//! retry interval between attempts, until its attempts run out. The table is
//! copy-on-write: subscribing or unsubscribing swaps in a new snapshot, so
//! in-flight dispatches keep iterating the snapshot they started with.

use crate::channel::{
    domain::{DispatchReport, DispatcherPolicy, HandlerOutcome, SubscriptionId},
    error::{DeliveryError, HandlerFailure},
    ports::{MessageHandler, MessageSelector, Sleeper},
};
use crate::message::domain::Message;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

#[derive(Clone)]
struct Subscription {
    id: SubscriptionId,
    handler: Arc<dyn MessageHandler>,
    selector: Option<Arc<dyn MessageSelector>>,
}

impl Subscription {
    fn is_eligible(&self, message: &Message) -> bool {
        self.handler.is_active()
            && self
                .selector
                .as_ref()
                .is_none_or(|selector| selector.accept(message))
    }
}

enum TargetOutcome {
    Accepted,
    Exhausted,
    Failed(HandlerFailure),
}

/// Distribution engine for one channel.
pub struct Dispatcher {
    channel: String,
    policy: DispatcherPolicy,
    sleeper: Arc<dyn Sleeper>,
    subscriptions: RwLock<Arc<Vec<Subscription>>>,
    next_id: AtomicU64,
}

impl Dispatcher {
    /// Creates a dispatcher for the named channel.
    #[must_use]
    pub fn new(
        channel: impl Into<String>,
        policy: DispatcherPolicy,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            channel: channel.into(),
            policy,
            sleeper,
            subscriptions: RwLock::new(Arc::new(Vec::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Returns the policy governing this dispatcher.
    #[must_use]
    pub const fn policy(&self) -> &DispatcherPolicy {
        &self.policy
    }

    /// Appends a handler to the subscription table.
    pub fn subscribe(&self, handler: Arc<dyn MessageHandler>) -> SubscriptionId {
        self.add_subscription(handler, None)
    }

    /// Appends a handler that is only offered messages its selector accepts.
    pub fn subscribe_with_selector(
        &self,
        handler: Arc<dyn MessageHandler>,
        selector: Arc<dyn MessageSelector>,
    ) -> SubscriptionId {
        self.add_subscription(handler, Some(selector))
    }

    /// Removes a subscription. Returns `false` when the id is unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut table = self
            .subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = table.len();
        let remaining: Vec<Subscription> = table
            .iter()
            .filter(|subscription| subscription.id != id)
            .cloned()
            .collect();
        let removed = remaining.len() != before;
        *table = Arc::new(remaining);
        removed
    }

    /// Returns the number of registered subscriptions, active or not.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.snapshot().len()
    }

    /// Distributes a message according to the policy.
    ///
    /// Returns a report of how many handlers accepted the message. A report
    /// with zero deliveries means every eligible handler was skipped or
    /// exhausted and the policy tolerates that.
    ///
    /// # Errors
    ///
    /// - [`DeliveryError::NoSubscribers`] when nothing is subscribed.
    /// - [`DeliveryError::RejectionLimitExceeded`] when handlers exhausted
    ///   their retries and the policy fails on that.
    /// - [`DeliveryError::HandlerFailed`] when a handler failed terminally.
    pub async fn dispatch(&self, message: &Message) -> Result<DispatchReport, DeliveryError> {
        let snapshot = self.snapshot();
        if snapshot.is_empty() {
            return Err(DeliveryError::NoSubscribers {
                channel: self.channel.clone(),
            });
        }

        if self.policy.is_broadcast() {
            self.broadcast(&snapshot, message).await
        } else {
            self.unicast(&snapshot, message).await
        }
    }

    async fn unicast(
        &self,
        subscriptions: &[Subscription],
        message: &Message,
    ) -> Result<DispatchReport, DeliveryError> {
        let mut exhausted = Vec::new();
        let mut last_failure = None;

        for subscription in subscriptions {
            if !subscription.is_eligible(message) {
                continue;
            }
            let name = subscription.handler.name().to_owned();
            match self.deliver_with_retry(subscription, message).await {
                TargetOutcome::Accepted => return Ok(DispatchReport::new(1, exhausted)),
                TargetOutcome::Exhausted => exhausted.push(name),
                TargetOutcome::Failed(source) => {
                    if !self.policy.failover() {
                        return Err(self.handler_failed(name, source));
                    }
                    warn!(
                        channel = %self.channel,
                        handler = %name,
                        error = %source,
                        "handler failed, failing over to next subscriber"
                    );
                    last_failure = Some((name, source));
                }
            }
        }

        if let Some((handler, source)) = last_failure {
            return Err(self.handler_failed(handler, source));
        }
        self.finish(0, exhausted)
    }

    async fn broadcast(
        &self,
        subscriptions: &[Subscription],
        message: &Message,
    ) -> Result<DispatchReport, DeliveryError> {
        let mut delivered = 0;
        let mut exhausted = Vec::new();
        let mut first_failure = None;

        for subscription in subscriptions {
            if !subscription.is_eligible(message) {
                continue;
            }
            let name = subscription.handler.name().to_owned();
            match self.deliver_with_retry(subscription, message).await {
                TargetOutcome::Accepted => delivered += 1,
                TargetOutcome::Exhausted => exhausted.push(name),
                TargetOutcome::Failed(source) => {
                    warn!(
                        channel = %self.channel,
                        handler = %name,
                        error = %source,
                        "broadcast handler failed"
                    );
                    first_failure.get_or_insert((name, source));
                }
            }
        }

        if let Some((handler, source)) = first_failure {
            return Err(self.handler_failed(handler, source));
        }
        self.finish(delivered, exhausted)
    }

    fn finish(
        &self,
        delivered: usize,
        exhausted: Vec<String>,
    ) -> Result<DispatchReport, DeliveryError> {
        if !exhausted.is_empty() && self.policy.fail_on_rejection_limit() {
            return Err(DeliveryError::RejectionLimitExceeded {
                channel: self.channel.clone(),
                exhausted,
            });
        }
        if delivered == 0 {
            debug!(channel = %self.channel, "message was not delivered to any subscriber");
        }
        Ok(DispatchReport::new(delivered, exhausted))
    }

    async fn deliver_with_retry(
        &self,
        subscription: &Subscription,
        message: &Message,
    ) -> TargetOutcome {
        let attempts = self.policy.attempts_per_target();
        let handler = subscription.handler.as_ref();
        let mut attempt = 1;
        loop {
            match handler.handle(message).await {
                HandlerOutcome::Accepted => return TargetOutcome::Accepted,
                HandlerOutcome::Failed(failure) => return TargetOutcome::Failed(failure),
                HandlerOutcome::Rejected { reason } => {
                    debug!(
                        channel = %self.channel,
                        handler = handler.name(),
                        message_id = %message.id(),
                        attempt,
                        reason = %reason,
                        "handler rejected message"
                    );
                    if attempt >= attempts {
                        warn!(
                            channel = %self.channel,
                            handler = handler.name(),
                            message_id = %message.id(),
                            attempts,
                            "rejection limit reached"
                        );
                        return TargetOutcome::Exhausted;
                    }
                    attempt += 1;
                    self.sleeper.sleep(self.policy.retry_interval()).await;
                }
            }
        }
    }

    fn handler_failed(&self, handler: String, source: HandlerFailure) -> DeliveryError {
        DeliveryError::HandlerFailed {
            channel: self.channel.clone(),
            handler,
            source,
        }
    }

    fn add_subscription(
        &self,
        handler: Arc<dyn MessageHandler>,
        selector: Option<Arc<dyn MessageSelector>>,
    ) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut table = self
            .subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut next: Vec<Subscription> = table.as_ref().clone();
        debug!(channel = %self.channel, handler = handler.name(), %id, "subscribing handler");
        next.push(Subscription {
            id,
            handler,
            selector,
        });
        *table = Arc::new(next);
        id
    }

    fn snapshot(&self) -> Arc<Vec<Subscription>> {
        Arc::clone(
            &self
                .subscriptions
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}
