//! Named channels and the dispatch engine behind them.
//!
//! # Architecture
//!
//! - **Domain**: dispatch policy, handler outcomes, dispatch reports
//! - **Ports**: [`ports::MessageChannel`], [`ports::PollableChannel`],
//!   [`ports::MessageHandler`], [`ports::MessageSelector`], [`ports::Sleeper`]
//! - **Services**: [`services::Dispatcher`] with bounded rejection retry,
//!   [`services::ErrorPublisher`], [`services::PollingConsumer`]
//! - **Adapters**: direct and publish-subscribe channels, bounded queues,
//!   channel bridges, bounded executors, and the channel registry
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use mockable::DefaultClock;
//! use switchyard::channel::adapters::SubscribableChannel;
//! use switchyard::channel::domain::HandlerOutcome;
//! use switchyard::channel::ports::{MessageChannel, MessageHandler};
//! use switchyard::message::domain::{Message, Payload};
//!
//! struct Printer;
//!
//! #[async_trait]
//! impl MessageHandler for Printer {
//!     fn name(&self) -> &str {
//!         "printer"
//!     }
//!
//!     async fn handle(&self, _message: &Message) -> HandlerOutcome {
//!         HandlerOutcome::Accepted
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let channel = SubscribableChannel::direct("input");
//! channel.subscribe(Arc::new(Printer));
//!
//! let sent = channel
//!     .send(Message::new(Payload::text("hi"), &DefaultClock), None)
//!     .await
//!     .expect("dispatch succeeds");
//! assert!(sent);
//! # });
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
