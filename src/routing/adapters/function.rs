//! Routes computed by a function returning a loosely typed value.

use crate::message::domain::Message;
use crate::routing::{domain::Destination, error::ConfigurationError, ports::RouteStrategy};
use serde_json::Value;

/// Delegates to a function returning channel names as a JSON value.
///
/// The value may be a string, an array of strings, or `null`; see
/// [`Destination::from_value`].
///
/// # Examples
///
/// ```
/// use mockable::DefaultClock;
/// use serde_json::json;
/// use switchyard::message::domain::{Message, Payload};
/// use switchyard::routing::adapters::FunctionRoutes;
/// use switchyard::routing::ports::RouteStrategy;
///
/// let strategy = FunctionRoutes::new(|message: &Message| {
///     json!(message.payload().as_text().map(|text| format!("echo.{text}")))
/// });
/// let message = Message::new(Payload::text("a"), &DefaultClock);
///
/// assert!(strategy.route(&message).expect("supported shape").is_some());
/// ```
pub struct FunctionRoutes<F>
where
    F: Fn(&Message) -> Value + Send + Sync,
{
    function: F,
}

impl<F> FunctionRoutes<F>
where
    F: Fn(&Message) -> Value + Send + Sync,
{
    /// Wraps `function` as a route strategy.
    #[must_use]
    pub const fn new(function: F) -> Self {
        Self { function }
    }
}

impl<F> RouteStrategy for FunctionRoutes<F>
where
    F: Fn(&Message) -> Value + Send + Sync,
{
    fn route(&self, message: &Message) -> Result<Option<Destination>, ConfigurationError> {
        Destination::from_value(&(self.function)(message))
    }
}
