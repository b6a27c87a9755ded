//! Bounded-concurrency execution of a handler on spawned tasks.

use crate::channel::{
    domain::{ExecutorLimits, HandlerOutcome},
    error::{ChannelConfigError, HandlerFailure},
    ports::MessageHandler,
    services::ErrorPublisher,
};
use crate::message::domain::Message;
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Runs an inner handler on spawned tasks with admission control.
///
/// At most `max_concurrency` messages are in flight. When every permit is
/// taken the executor answers [`HandlerOutcome::Rejected`], which lets the
/// channel's dispatcher back off and retry. Accepted messages are processed
/// asynchronously, so their failures are published to the error channel
/// rather than returned.
pub struct BoundedExecutor<C>
where
    C: Clock + Send + Sync + 'static,
{
    name: String,
    inner: Arc<dyn MessageHandler>,
    permits: Arc<Semaphore>,
    errors: Option<ErrorPublisher<C>>,
}

impl<C> BoundedExecutor<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Wraps `inner` with the given limits.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelConfigError::ZeroConcurrency`] when the limits allow
    /// no task at all.
    pub fn new(
        inner: Arc<dyn MessageHandler>,
        limits: ExecutorLimits,
    ) -> Result<Self, ChannelConfigError> {
        let name = format!("executor-{}", inner.name());
        if limits.max_concurrency() == 0 {
            return Err(ChannelConfigError::ZeroConcurrency(name));
        }
        Ok(Self {
            name,
            inner,
            permits: Arc::new(Semaphore::new(limits.max_concurrency())),
            errors: None,
        })
    }

    /// Publishes asynchronous failures through `errors`.
    #[must_use]
    pub fn with_error_publisher(mut self, errors: ErrorPublisher<C>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Returns the number of free execution slots.
    #[must_use]
    pub fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }
}

#[async_trait]
impl<C> MessageHandler for BoundedExecutor<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, message: &Message) -> HandlerOutcome {
        let Ok(permit) = Arc::clone(&self.permits).try_acquire_owned() else {
            return HandlerOutcome::rejected(format!("executor '{}' is saturated", self.name));
        };

        let inner = Arc::clone(&self.inner);
        let errors = self.errors.clone();
        let owned = message.clone();
        debug!(executor = %self.name, message_id = %owned.id(), "scheduling message");
        tokio::spawn(async move {
            let outcome = inner.handle(&owned).await;
            drop(permit);
            let failure = match outcome {
                HandlerOutcome::Accepted => return,
                HandlerOutcome::Rejected { reason } => HandlerFailure::message(format!(
                    "handler '{}' rejected an accepted message: {reason}",
                    inner.name()
                )),
                HandlerOutcome::Failed(failure) => failure,
            };
            match errors {
                Some(publisher) => {
                    publisher.publish(&failure, Some(owned)).await;
                }
                None => warn!(
                    handler = inner.name(),
                    message_id = %owned.id(),
                    error = %failure,
                    "asynchronous handler failed and no error channel is configured"
                ),
            }
        });
        HandlerOutcome::Accepted
    }

    fn is_active(&self) -> bool {
        self.inner.is_active()
    }
}
