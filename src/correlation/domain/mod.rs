//! Correlation barriers.
//!
//! A barrier owns the buffered messages of one group and decides, message
//! by message, what is released. Every barrier serialises its own
//! mutations behind a per-barrier mutex, so concurrent arrivals for
//! different groups never contend.

mod aggregation;
mod barrier;
mod resequencing;

pub use aggregation::AggregationBarrier;
pub use barrier::CorrelationBarrier;
pub use resequencing::ResequencingBarrier;
