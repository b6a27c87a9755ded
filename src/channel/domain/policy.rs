//! Dispatcher and executor configuration.
//!
//! Both structs deserialise from configuration documents; omitted fields
//! take their defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_REJECTION_LIMIT: u32 = 5;
const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(1000);

/// Governs how one channel's dispatcher distributes messages.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use switchyard::channel::domain::DispatcherPolicy;
///
/// let policy = DispatcherPolicy::unicast()
///     .with_rejection_limit(2)
///     .with_retry_interval(Duration::from_millis(10))
///     .with_fail_on_rejection_limit(false);
///
/// assert!(!policy.is_broadcast());
/// assert_eq!(policy.attempts_per_target(), 2);
///
/// let parsed: DispatcherPolicy =
///     serde_json::from_str(r#"{"broadcast": true, "retry_interval_millis": 250}"#)
///         .expect("valid policy");
/// assert!(parsed.is_broadcast());
/// assert_eq!(parsed.retry_interval(), Duration::from_millis(250));
/// assert_eq!(parsed.rejection_limit(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherPolicy {
    broadcast: bool,
    rejection_limit: u32,
    #[serde(rename = "retry_interval_millis", with = "millis")]
    retry_interval: Duration,
    fail_on_rejection_limit: bool,
    failover: bool,
}

impl DispatcherPolicy {
    /// Point-to-point policy: each message reaches at most one handler.
    #[must_use]
    pub const fn unicast() -> Self {
        Self {
            broadcast: false,
            rejection_limit: DEFAULT_REJECTION_LIMIT,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            fail_on_rejection_limit: true,
            failover: true,
        }
    }

    /// Publish-subscribe policy: each message reaches every active handler.
    #[must_use]
    pub const fn broadcast() -> Self {
        Self {
            broadcast: true,
            ..Self::unicast()
        }
    }

    /// Sets the number of delivery attempts made against a rejecting handler.
    #[must_use]
    pub const fn with_rejection_limit(mut self, limit: u32) -> Self {
        self.rejection_limit = limit;
        self
    }

    /// Sets the pause between attempts against a rejecting handler.
    #[must_use]
    pub const fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Sets whether exhausting the rejection limit is a terminal failure.
    #[must_use]
    pub const fn with_fail_on_rejection_limit(mut self, fail: bool) -> Self {
        self.fail_on_rejection_limit = fail;
        self
    }

    /// Sets whether a unicast dispatch moves on after a terminal handler
    /// failure.
    #[must_use]
    pub const fn with_failover(mut self, failover: bool) -> Self {
        self.failover = failover;
        self
    }

    /// Returns `true` for publish-subscribe dispatch.
    #[must_use]
    pub const fn is_broadcast(&self) -> bool {
        self.broadcast
    }

    /// Returns the configured rejection limit.
    #[must_use]
    pub const fn rejection_limit(&self) -> u32 {
        self.rejection_limit
    }

    /// Returns the pause between retries.
    #[must_use]
    pub const fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// Returns whether exhaustion raises a delivery failure.
    #[must_use]
    pub const fn fail_on_rejection_limit(&self) -> bool {
        self.fail_on_rejection_limit
    }

    /// Returns whether unicast dispatch fails over after terminal failures.
    #[must_use]
    pub const fn failover(&self) -> bool {
        self.failover
    }

    /// Total attempts made against one rejecting handler.
    ///
    /// A handler is always tried at least once, even with a limit of zero.
    #[must_use]
    pub const fn attempts_per_target(&self) -> u32 {
        if self.rejection_limit == 0 {
            1
        } else {
            self.rejection_limit
        }
    }
}

impl Default for DispatcherPolicy {
    fn default() -> Self {
        Self::unicast()
    }
}

/// Admission limits for a bounded executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorLimits {
    max_concurrency: usize,
}

impl ExecutorLimits {
    /// Creates limits allowing `max_concurrency` in-flight tasks.
    #[must_use]
    pub const fn new(max_concurrency: usize) -> Self {
        Self { max_concurrency }
    }

    /// Returns the maximum number of in-flight tasks.
    #[must_use]
    pub const fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }
}

impl Default for ExecutorLimits {
    fn default() -> Self {
        Self::new(8)
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
