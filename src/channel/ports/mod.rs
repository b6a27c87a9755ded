//! Port contracts for channels, handlers, selectors, and backoff.

mod channel;
mod handler;
mod selector;
mod sleeper;

pub use channel::{ChannelResolver, MessageChannel, PollableChannel};
pub use handler::MessageHandler;
pub use selector::MessageSelector;
pub use sleeper::Sleeper;
