//! Routing domain types.

mod destination;
mod options;

pub use destination::Destination;
pub use options::RouterOptions;
