//! Name-indexed table of channels.

use crate::channel::{
    error::ChannelConfigError,
    ports::{ChannelResolver, MessageChannel},
};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Thread-safe registry resolving channel names to channels.
#[derive(Clone, Default)]
pub struct ChannelRegistry {
    channels: Arc<RwLock<HashMap<String, Arc<dyn MessageChannel>>>>,
}

impl ChannelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a channel under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelConfigError::DuplicateChannel`] when the name is
    /// taken.
    pub fn register(&self, channel: Arc<dyn MessageChannel>) -> Result<(), ChannelConfigError> {
        let mut channels = self
            .channels
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let name = channel.name().to_owned();
        if channels.contains_key(&name) {
            return Err(ChannelConfigError::DuplicateChannel(name));
        }
        channels.insert(name, channel);
        Ok(())
    }

    /// Removes and returns the channel registered under `name`.
    pub fn remove(&self, name: &str) -> Option<Arc<dyn MessageChannel>> {
        self.channels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// Returns the registered channel names in no particular order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl ChannelResolver for ChannelRegistry {
    fn resolve(&self, name: &str) -> Option<Arc<dyn MessageChannel>> {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}
