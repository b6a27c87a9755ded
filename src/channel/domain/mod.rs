//! Domain types for channel dispatch.

mod outcome;
mod policy;

pub use outcome::{DispatchReport, HandlerOutcome, SubscriptionId};
pub use policy::{DispatcherPolicy, ExecutorLimits};
