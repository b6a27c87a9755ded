//! Outcomes of handler invocations and of whole dispatches.

use crate::channel::error::HandlerFailure;
use std::fmt;

/// Result of offering a message to one handler.
#[derive(Debug, Clone)]
pub enum HandlerOutcome {
    /// The handler took the message.
    Accepted,
    /// The handler is momentarily out of capacity; the offer may be retried.
    Rejected {
        /// Why the handler declined.
        reason: String,
    },
    /// The handler failed and retrying will not help.
    Failed(HandlerFailure),
}

impl HandlerOutcome {
    /// Creates a transient rejection.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`HandlerOutcome::Accepted`].
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription-{}", self.0)
    }
}

/// Summary of a dispatch that did not end in a terminal failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    delivered: usize,
    exhausted: Vec<String>,
}

impl DispatchReport {
    pub(crate) const fn new(delivered: usize, exhausted: Vec<String>) -> Self {
        Self {
            delivered,
            exhausted,
        }
    }

    /// Returns how many handlers accepted the message.
    #[must_use]
    pub const fn delivered(&self) -> usize {
        self.delivered
    }

    /// Returns the handlers that exhausted their rejection retries.
    #[must_use]
    pub fn exhausted(&self) -> &[String] {
        &self.exhausted
    }

    /// Returns `true` when at least one handler accepted the message.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        self.delivered > 0
    }
}
