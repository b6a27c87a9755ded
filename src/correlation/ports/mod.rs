//! Strategy ports that parameterise correlation handlers.

mod completion;
mod processor;
mod strategy;

pub use completion::CompletionStrategy;
#[cfg(test)]
pub(crate) use completion::MockCompletionStrategy;
pub use processor::ReleaseProcessor;
pub use strategy::{CorrelationStrategy, SequenceStrategy};
