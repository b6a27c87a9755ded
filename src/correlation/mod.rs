//! Correlation barriers: aggregation and resequencing of related messages.
//!
//! Messages sharing a correlation key are buffered in a per-group barrier.
//! An aggregation barrier releases the whole group once its
//! [`ports::CompletionStrategy`] says so; a resequencing barrier releases
//! messages in sequence order, either as soon as a contiguous prefix is
//! available or only once the full sequence has arrived.
//!
//! # Architecture
//!
//! - **Domain**: [`domain::AggregationBarrier`], [`domain::ResequencingBarrier`]
//!   behind the [`domain::CorrelationBarrier`] trait
//! - **Ports**: correlation, sequence and completion strategies plus the
//!   [`ports::ReleaseProcessor`] that turns a released group into output
//! - **Adapters**: header-based strategies, [`adapters::SequenceSizeCompletion`],
//!   [`adapters::CountCompletion`], [`adapters::ListAggregator`],
//!   [`adapters::PassThrough`]
//! - **Services**: [`services::BarrierRegistry`] and the
//!   [`services::CorrelationHandler`] endpoint
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use mockable::DefaultClock;
//! use switchyard::channel::adapters::QueueChannel;
//! use switchyard::channel::ports::{MessageChannel, MessageHandler, PollableChannel};
//! use switchyard::correlation::adapters::CountCompletion;
//! use switchyard::correlation::services::CorrelationHandler;
//! use switchyard::message::domain::{CorrelationId, Message, Payload};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let output = Arc::new(QueueChannel::new("batches", 4).expect("valid capacity"));
//! let aggregator = CorrelationHandler::aggregator(
//!     "batcher",
//!     Arc::clone(&output) as Arc<dyn MessageChannel>,
//!     Arc::new(CountCompletion::new(2)),
//!     Arc::new(DefaultClock),
//! );
//!
//! for value in ["a", "b"] {
//!     let message = Message::builder(Payload::text(value))
//!         .with_correlation_id(CorrelationId::new("order-7"))
//!         .build(&DefaultClock);
//!     assert!(aggregator.handle(&message).await.is_accepted());
//! }
//!
//! let batch = output
//!     .receive(Some(Duration::ZERO))
//!     .await
//!     .expect("receive succeeds")
//!     .expect("group released");
//! assert_eq!(batch.payload().as_list().map(<[Payload]>::len), Some(2));
//! # });
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
