//! Message headers: correlation, sequencing, timestamp, and custom values.

use super::CorrelationId;
use crate::message::error::MessageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Position of a message within an ordered group.
///
/// Both values are 1-based and `number` never exceeds `size`.
///
/// # Examples
///
/// ```
/// use switchyard::message::domain::SequenceDetails;
///
/// let details = SequenceDetails::new(2, 3).expect("valid sequence");
/// assert_eq!(details.number(), 2);
/// assert!(!details.is_last());
/// assert!(SequenceDetails::new(0, 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceDetails {
    number: u32,
    size: u32,
}

impl SequenceDetails {
    /// Creates sequence details.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidSequence`] when `number` is zero or
    /// greater than `size`.
    pub const fn new(number: u32, size: u32) -> Result<Self, MessageError> {
        if number == 0 || number > size {
            return Err(MessageError::InvalidSequence { number, size });
        }
        Ok(Self { number, size })
    }

    /// Returns the 1-based position.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Returns the total group size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns `true` when this is the terminal element of the group.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.number == self.size
    }
}

/// Header block carried by every message.
///
/// Well-known headers are typed fields; anything else lives in the custom
/// map, whose keys are unique and iterate in sorted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageHeaders {
    correlation_id: Option<CorrelationId>,
    sequence: Option<SequenceDetails>,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    custom: BTreeMap<String, Value>,
}

impl MessageHeaders {
    pub(crate) const fn from_parts(
        correlation_id: Option<CorrelationId>,
        sequence: Option<SequenceDetails>,
        timestamp: DateTime<Utc>,
        custom: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            correlation_id,
            sequence,
            timestamp,
            custom,
        }
    }

    /// Returns the correlation identifier, if any.
    #[must_use]
    pub const fn correlation_id(&self) -> Option<&CorrelationId> {
        self.correlation_id.as_ref()
    }

    /// Returns the sequence details, if any.
    #[must_use]
    pub const fn sequence(&self) -> Option<SequenceDetails> {
        self.sequence
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Looks up a custom header.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.custom.get(key)
    }

    /// Returns all custom headers.
    #[must_use]
    pub const fn custom(&self) -> &BTreeMap<String, Value> {
        &self.custom
    }
}
