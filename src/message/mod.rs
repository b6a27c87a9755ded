//! The message envelope shared by channels, routers, and correlation
//! handlers.
//!
//! A [`domain::Message`] carries an opaque [`domain::Payload`] and a header
//! block with the well-known correlation and sequencing headers.
//!
//! # Example
//!
//! ```
//! use switchyard::message::domain::{Message, Payload};
//! use mockable::DefaultClock;
//!
//! let clock = DefaultClock;
//! let original = Message::new(Payload::text("ping"), &clock);
//! let reply = original.derive().with_payload(Payload::text("pong")).build(&clock);
//!
//! assert_ne!(original.id(), reply.id());
//! assert_eq!(reply.payload().as_text(), Some("pong"));
//! ```

pub mod domain;
pub mod error;

#[cfg(test)]
mod tests;
