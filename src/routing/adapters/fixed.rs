//! Routes every message to the same destinations.

use crate::message::domain::Message;
use crate::routing::{domain::Destination, error::ConfigurationError, ports::RouteStrategy};

/// Sends every message to a fixed list of destinations.
#[derive(Debug, Clone)]
pub struct StaticRoutes {
    destinations: Vec<Destination>,
}

impl StaticRoutes {
    /// Creates a strategy routing to `destinations` in order.
    #[must_use]
    pub fn new(destinations: impl IntoIterator<Item = Destination>) -> Self {
        Self {
            destinations: destinations.into_iter().collect(),
        }
    }
}

impl RouteStrategy for StaticRoutes {
    fn route(&self, _message: &Message) -> Result<Option<Destination>, ConfigurationError> {
        Ok((!self.destinations.is_empty()).then(|| Destination::Many(self.destinations.clone())))
    }
}
