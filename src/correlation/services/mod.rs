//! Barrier bookkeeping and the correlating endpoint.

mod handler;
mod registry;

pub use handler::CorrelationHandler;
pub use registry::BarrierRegistry;
