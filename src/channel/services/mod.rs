//! Channel services: dispatch, error publication, and polling consumers.

mod dispatcher;
mod error_publisher;
mod polling;

pub use dispatcher::Dispatcher;
pub use error_publisher::ErrorPublisher;
pub use polling::PollingConsumer;
