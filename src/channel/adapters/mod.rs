//! Channel and handler implementations.

mod bridge;
mod executor;
mod queue;
mod registry;
mod sleeper;
mod subscribable;

pub use bridge::ChannelBridge;
pub use executor::BoundedExecutor;
pub use queue::QueueChannel;
pub use registry::ChannelRegistry;
pub use sleeper::TokioSleeper;
pub use subscribable::SubscribableChannel;
