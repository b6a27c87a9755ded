//! Channels that push messages to subscribers on the sending task.

use super::TokioSleeper;
use crate::channel::{
    domain::{DispatcherPolicy, SubscriptionId},
    error::ChannelResult,
    ports::{MessageChannel, MessageHandler, MessageSelector, Sleeper},
    services::Dispatcher,
};
use crate::message::domain::Message;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// A channel whose `send` dispatches directly to its subscribers.
///
/// Whether a message reaches one subscriber or all of them is decided by the
/// channel's [`DispatcherPolicy`].
///
/// # Examples
///
/// ```
/// use switchyard::channel::adapters::SubscribableChannel;
/// use switchyard::channel::ports::MessageChannel;
///
/// let orders = SubscribableChannel::direct("orders");
/// let audit = SubscribableChannel::publish_subscribe("audit");
///
/// assert_eq!(orders.name(), "orders");
/// assert!(!orders.policy().is_broadcast());
/// assert!(audit.policy().is_broadcast());
/// ```
pub struct SubscribableChannel {
    name: String,
    dispatcher: Dispatcher,
}

impl SubscribableChannel {
    /// Creates a channel with an explicit policy and backoff.
    #[must_use]
    pub fn new(name: impl Into<String>, policy: DispatcherPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        let name = name.into();
        let dispatcher = Dispatcher::new(name.clone(), policy, sleeper);
        Self { name, dispatcher }
    }

    /// Creates a point-to-point channel with the default policy.
    #[must_use]
    pub fn direct(name: impl Into<String>) -> Self {
        Self::new(name, DispatcherPolicy::unicast(), Arc::new(TokioSleeper))
    }

    /// Creates a publish-subscribe channel with the default policy.
    #[must_use]
    pub fn publish_subscribe(name: impl Into<String>) -> Self {
        Self::new(name, DispatcherPolicy::broadcast(), Arc::new(TokioSleeper))
    }

    /// Returns the dispatch policy.
    #[must_use]
    pub const fn policy(&self) -> &DispatcherPolicy {
        self.dispatcher.policy()
    }

    /// Subscribes a handler.
    pub fn subscribe(&self, handler: Arc<dyn MessageHandler>) -> SubscriptionId {
        self.dispatcher.subscribe(handler)
    }

    /// Subscribes a handler guarded by a selector.
    pub fn subscribe_with_selector(
        &self,
        handler: Arc<dyn MessageHandler>,
        selector: Arc<dyn MessageSelector>,
    ) -> SubscriptionId {
        self.dispatcher.subscribe_with_selector(handler, selector)
    }

    /// Removes a subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    /// Returns the number of subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.dispatcher.subscriber_count()
    }
}

#[async_trait]
impl MessageChannel for SubscribableChannel {
    fn name(&self) -> &str {
        &self.name
    }

    /// Dispatches on the caller's task. There is no buffer to wait on, so
    /// `timeout` is ignored; pacing comes from the dispatcher's retry policy.
    async fn send(&self, message: Message, _timeout: Option<Duration>) -> ChannelResult<bool> {
        let report = self.dispatcher.dispatch(&message).await?;
        Ok(report.is_delivered())
    }
}
