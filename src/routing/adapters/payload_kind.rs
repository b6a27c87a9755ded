//! Routes by payload kind.

use crate::message::domain::{Message, PayloadKind};
use crate::routing::{domain::Destination, error::ConfigurationError, ports::RouteStrategy};
use std::collections::HashMap;

/// Maps each [`PayloadKind`] to a destination.
///
/// Kinds without a mapping resolve to nothing.
#[derive(Debug, Clone, Default)]
pub struct PayloadKindRoutes {
    routes: HashMap<PayloadKind, Destination>,
}

impl PayloadKindRoutes {
    /// Creates a strategy with no mappings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `kind` to `destination`, replacing an earlier mapping.
    #[must_use]
    pub fn with_route(mut self, kind: PayloadKind, destination: Destination) -> Self {
        self.routes.insert(kind, destination);
        self
    }
}

impl RouteStrategy for PayloadKindRoutes {
    fn route(&self, message: &Message) -> Result<Option<Destination>, ConfigurationError> {
        Ok(self.routes.get(&message.payload().kind()).cloned())
    }
}
