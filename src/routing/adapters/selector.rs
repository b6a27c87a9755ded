//! Recipient-list routing keyed by selectors.

use crate::channel::ports::MessageSelector;
use crate::message::domain::Message;
use crate::routing::{domain::Destination, error::ConfigurationError, ports::RouteStrategy};
use std::sync::Arc;

/// Routes to the destinations of every selector that accepts the message,
/// in registration order.
#[derive(Clone, Default)]
pub struct SelectorRoutes {
    recipients: Vec<(Arc<dyn MessageSelector>, Vec<Destination>)>,
}

impl SelectorRoutes {
    /// Creates a strategy with no recipients.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds destinations reached whenever `selector` accepts a message.
    #[must_use]
    pub fn with_recipients(
        mut self,
        selector: Arc<dyn MessageSelector>,
        destinations: impl IntoIterator<Item = Destination>,
    ) -> Self {
        self.recipients
            .push((selector, destinations.into_iter().collect()));
        self
    }
}

impl RouteStrategy for SelectorRoutes {
    fn route(&self, message: &Message) -> Result<Option<Destination>, ConfigurationError> {
        let matched: Vec<Destination> = self
            .recipients
            .iter()
            .filter(|(selector, _)| selector.accept(message))
            .flat_map(|(_, destinations)| destinations.iter().cloned())
            .collect();
        Ok((!matched.is_empty()).then_some(Destination::Many(matched)))
    }
}
