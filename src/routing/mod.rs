//! Router resolution: from a message to the channels it should reach.
//!
//! A [`ports::RouteStrategy`] inspects a message and returns a
//! [`domain::Destination`], which may name channels, reference them
//! directly, or nest several destinations. The [`services::Router`]
//! flattens that into an ordered channel list, applying name prefixes and
//! suffixes, the default output channel, and the resolution-required rule,
//! and then sends the message to each channel.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mockable::DefaultClock;
//! use switchyard::channel::adapters::QueueChannel;
//! use switchyard::channel::ports::MessageChannel;
//! use switchyard::message::domain::{Message, Payload, PayloadKind};
//! use switchyard::routing::adapters::PayloadKindRoutes;
//! use switchyard::routing::domain::Destination;
//! use switchyard::routing::services::RouterBuilder;
//!
//! let text = Arc::new(QueueChannel::new("text", 4).expect("valid capacity"));
//! let strategy = PayloadKindRoutes::new()
//!     .with_route(PayloadKind::Text, Destination::name("text"));
//! let router = RouterBuilder::new("by-kind", Arc::new(strategy))
//!     .with_channel(Arc::clone(&text) as Arc<dyn MessageChannel>)
//!     .build(Arc::new(DefaultClock))
//!     .expect("valid router");
//!
//! let message = Message::new(Payload::text("hello"), &DefaultClock);
//! let channels = router.resolve(&message).expect("resolved");
//! assert_eq!(channels.len(), 1);
//! assert_eq!(channels[0].name(), "text");
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
