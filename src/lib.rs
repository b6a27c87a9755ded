//! Switchyard: in-process message integration runtime.
//!
//! This crate moves messages between named channels and the handlers
//! subscribed to them, with bounded retry when handlers are at capacity,
//! routing by message content, and correlation of related messages into
//! aggregated or resequenced groups.
//!
//! # Architecture
//!
//! Switchyard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure values and state machines with no runtime dependencies
//! - **Ports**: Abstract trait interfaces for channels, handlers, and strategies
//! - **Adapters**: Concrete channels, executors, and stock strategies
//! - **Services**: The dispatcher, router, and correlation handler
//!
//! # Modules
//!
//! - [`message`]: The immutable message envelope and its headers
//! - [`channel`]: Channels, handlers, dispatch policy, and the error channel
//! - [`routing`]: Destination resolution and delivery
//! - [`correlation`]: Aggregation and resequencing barriers

pub mod channel;
pub mod correlation;
pub mod message;
pub mod routing;

#[cfg(test)]
pub(crate) mod test_support;
