//! Route strategy port.

use crate::message::domain::Message;
use crate::routing::{domain::Destination, error::ConfigurationError};

/// Chooses the destination of a message.
pub trait RouteStrategy: Send + Sync {
    /// Returns the destination for `message`, or `None` when the strategy
    /// has no opinion.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnsupportedRouteShape`] when the
    /// strategy's own output cannot be interpreted as a destination.
    fn route(&self, message: &Message) -> Result<Option<Destination>, ConfigurationError>;
}
