//! The shapes a route strategy may return.

use crate::channel::ports::MessageChannel;
use crate::routing::error::ConfigurationError;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Where a message should go.
///
/// Destinations nest: a [`Destination::Many`] may hold channel references,
/// names, and further lists. Routers flatten them depth first, preserving
/// order.
#[derive(Clone)]
pub enum Destination {
    /// A channel reference, used as is.
    Channel(Arc<dyn MessageChannel>),
    /// A channel name, resolved by the router.
    Name(String),
    /// Several destinations in order.
    Many(Vec<Destination>),
}

impl Destination {
    /// Creates a destination naming a channel.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a destination referencing a channel.
    #[must_use]
    pub fn channel(channel: Arc<dyn MessageChannel>) -> Self {
        Self::Channel(channel)
    }

    /// Creates a list of destinations.
    #[must_use]
    pub fn many(destinations: impl IntoIterator<Item = Self>) -> Self {
        Self::Many(destinations.into_iter().collect())
    }

    /// Interprets a loosely typed route value.
    ///
    /// A string names one channel, an array of strings names several, and
    /// `null` means no destination.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnsupportedRouteShape`] for any other
    /// value, including arrays holding non-string elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use switchyard::routing::domain::Destination;
    ///
    /// assert!(Destination::from_value(&json!(null)).expect("null").is_none());
    /// assert!(Destination::from_value(&json!(["a", "b"])).expect("names").is_some());
    /// assert!(Destination::from_value(&json!(42)).is_err());
    /// ```
    pub fn from_value(value: &Value) -> Result<Option<Self>, ConfigurationError> {
        match value {
            Value::Null => Ok(None),
            Value::String(name) => Ok(Some(Self::name(name.as_str()))),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(name) => Ok(Self::name(name.as_str())),
                    other => Err(unsupported(other, "array element")),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(|names| Some(Self::Many(names))),
            other => Err(unsupported(other, "value")),
        }
    }
}

fn unsupported(value: &Value, position: &str) -> ConfigurationError {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    ConfigurationError::UnsupportedRouteShape {
        shape: format!("{kind} {position} {value}"),
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(channel) => f.debug_tuple("Channel").field(&channel.name()).finish(),
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Many(destinations) => f.debug_tuple("Many").field(destinations).finish(),
        }
    }
}

impl From<&str> for Destination {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

impl From<Arc<dyn MessageChannel>> for Destination {
    fn from(channel: Arc<dyn MessageChannel>) -> Self {
        Self::Channel(channel)
    }
}
