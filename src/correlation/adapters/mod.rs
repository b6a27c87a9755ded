//! Stock strategies and release processors.

mod completion;
mod headers;
mod processors;

pub use completion::{CountCompletion, SequenceSizeCompletion};
pub use headers::{HeaderCorrelationStrategy, HeaderSequenceStrategy};
pub use processors::{ListAggregator, PassThrough};
