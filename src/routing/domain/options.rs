//! Router configuration.

use serde::{Deserialize, Serialize};

/// Name resolution knobs for a router.
///
/// Deserialises from configuration documents; omitted fields take their
/// defaults. Resolution is required by default, so a message that resolves
/// to no channel is an error unless a default output channel is set.
///
/// # Examples
///
/// ```
/// use switchyard::routing::domain::RouterOptions;
///
/// let options: RouterOptions =
///     serde_json::from_str(r#"{"prefix": "orders.", "resolution_required": false}"#)
///         .expect("valid options");
///
/// assert_eq!(options.channel_name("eu"), "orders.eu");
/// assert!(!options.resolution_required());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    prefix: Option<String>,
    suffix: Option<String>,
    resolution_required: bool,
    apply_sequence: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            suffix: None,
            resolution_required: true,
            apply_sequence: false,
        }
    }
}

impl RouterOptions {
    /// Prepends `prefix` to every resolved channel name.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Appends `suffix` to every resolved channel name.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Sets whether an empty resolution is an error.
    #[must_use]
    pub const fn with_resolution_required(mut self, required: bool) -> Self {
        self.resolution_required = required;
        self
    }

    /// Sets whether fanned-out copies are stamped with sequence headers.
    #[must_use]
    pub const fn with_apply_sequence(mut self, apply: bool) -> Self {
        self.apply_sequence = apply;
        self
    }

    /// Returns whether an empty resolution is an error.
    #[must_use]
    pub const fn resolution_required(&self) -> bool {
        self.resolution_required
    }

    /// Returns whether fanned-out copies are stamped with sequence headers.
    #[must_use]
    pub const fn apply_sequence(&self) -> bool {
        self.apply_sequence
    }

    /// Returns the full channel name for `name`, with prefix and suffix.
    #[must_use]
    pub fn channel_name(&self, name: &str) -> String {
        format!(
            "{}{name}{}",
            self.prefix.as_deref().unwrap_or_default(),
            self.suffix.as_deref().unwrap_or_default()
        )
    }
}
