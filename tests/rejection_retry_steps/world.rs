//! Shared world state for rejection retry BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rstest::fixture;
use switchyard::channel::{
    adapters::SubscribableChannel,
    domain::HandlerOutcome,
    error::ChannelResult,
    ports::{MessageHandler, Sleeper},
};
use switchyard::message::domain::Message;

/// Subscriber answering every message the same way.
pub struct FixedSubscriber {
    name: String,
    accepts: bool,
    offered: AtomicUsize,
}

impl FixedSubscriber {
    /// Creates a subscriber that always accepts or always rejects.
    #[must_use]
    pub fn new(name: String, accepts: bool) -> Arc<Self> {
        Arc::new(Self {
            name,
            accepts,
            offered: AtomicUsize::new(0),
        })
    }

    /// Returns how many times a message was offered.
    #[must_use]
    pub fn offered(&self) -> usize {
        self.offered.load(Ordering::SeqCst)
    }

    /// Returns `true` for subscribers that accept.
    #[must_use]
    pub const fn accepts(&self) -> bool {
        self.accepts
    }
}

#[async_trait]
impl MessageHandler for FixedSubscriber {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, _message: &Message) -> HandlerOutcome {
        self.offered.fetch_add(1, Ordering::SeqCst);
        if self.accepts {
            HandlerOutcome::Accepted
        } else {
            HandlerOutcome::rejected("at capacity")
        }
    }
}

/// Sleeper that never waits.
pub struct NoPause;

#[async_trait]
impl Sleeper for NoPause {
    async fn sleep(&self, _duration: Duration) {}
}

/// Scenario world for rejection retry behaviour tests.
#[derive(Default)]
pub struct RetryWorld {
    /// The channel under test.
    pub channel: Option<SubscribableChannel>,
    /// Subscribers by name.
    pub subscribers: HashMap<String, Arc<FixedSubscriber>>,
    /// Result of the last send.
    pub last_send: Option<ChannelResult<bool>>,
}

impl RetryWorld {
    /// Returns the channel configured by a given step.
    ///
    /// # Errors
    ///
    /// Returns an error when no channel was configured.
    pub fn channel(&self) -> Result<&SubscribableChannel, eyre::Report> {
        self.channel
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no channel configured in scenario world"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RetryWorld {
    RetryWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
