//! Backoff port used between delivery retries.

use async_trait::async_trait;
use std::time::Duration;

/// Suspends the current task between retry attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Waits for `duration`.
    async fn sleep(&self, duration: Duration);
}
