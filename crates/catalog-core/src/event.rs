//! Event envelope shared by every entity family.
//!
//! Each family defines its own sum type (`ProductEvent`, ...) implementing
//! [`DomainEvent`]. On the wire they all travel as an [`EventEnvelope`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Kind of change an event requests from the owning service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    /// Insert the carried entity.
    Create,
    /// Remove every entity stored under the event key.
    Delete,
}

impl EventType {
    /// Wire name of the event type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(Self::Create),
            "DELETE" => Ok(Self::Delete),
            other => Err(DomainError::EventProcessing(format!(
                "Incorrect event type: {other}, expected a CREATE or DELETE event"
            ))),
        }
    }
}

/// Metadata carried by every family event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMetadata {
    /// Partition key; the product identifier for all families.
    pub key: i32,
    /// Assigned once when the event is constructed.
    pub created_at: DateTime<Utc>,
}

/// Serialized form of an event as handed to the transport.
///
/// `event_type` stays a string so that an unknown kind still decodes as an
/// envelope and can be rejected with a proper `EventProcessing` error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    /// `CREATE` or `DELETE`.
    pub event_type: String,
    /// Partition key.
    pub key: i32,
    /// Entity payload, present for `CREATE` only.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Creation timestamp.
    pub event_created_at: DateTime<Utc>,
}

impl EventEnvelope {
    /// Builds an envelope, serializing the payload if one is given.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the payload cannot be
    /// represented as JSON.
    pub fn new<T: Serialize>(
        event_type: EventType,
        metadata: &EventMetadata,
        data: Option<&T>,
    ) -> Result<Self, DomainError> {
        let data = data
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| DomainError::Infrastructure(format!("event serialization failed: {e}")))?;
        Ok(Self {
            event_type: event_type.as_str().to_owned(),
            key: metadata.key,
            data,
            event_created_at: metadata.created_at,
        })
    }

    /// Decodes an envelope from a transport message body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EventProcessing` if the body is not a valid
    /// envelope.
    pub fn from_bytes(body: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(body)
            .map_err(|e| DomainError::EventProcessing(format!("malformed event envelope: {e}")))
    }

    /// Encodes the envelope as a transport message body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DomainError> {
        serde_json::to_vec(self)
            .map_err(|e| DomainError::Infrastructure(format!("event serialization failed: {e}")))
    }

    /// Parses the event type.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EventProcessing` for any kind other than
    /// `CREATE` or `DELETE`.
    pub fn kind(&self) -> Result<EventType, DomainError> {
        self.event_type.parse()
    }

    /// Returns the event metadata.
    #[must_use]
    pub fn metadata(&self) -> EventMetadata {
        EventMetadata {
            key: self.key,
            created_at: self.event_created_at,
        }
    }

    /// Decodes the payload as the given entity type.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EventProcessing` if the payload is missing or
    /// does not decode.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T, DomainError> {
        let Some(data) = &self.data else {
            return Err(DomainError::EventProcessing(format!(
                "{} event with key {} carries no data",
                self.event_type, self.key
            )));
        };
        T::deserialize(data).map_err(|e| {
            DomainError::EventProcessing(format!(
                "undecodable payload in event with key {}: {e}",
                self.key
            ))
        })
    }

    /// Compares kind, key and payload, ignoring the creation timestamp.
    #[must_use]
    pub fn is_same_event(&self, other: &Self) -> bool {
        self.event_type == other.event_type && self.key == other.key && self.data == other.data
    }
}

/// Trait implemented by each family's event sum type.
pub trait DomainEvent: Send + Sync + fmt::Debug + Sized {
    /// Returns the kind of the event.
    fn event_type(&self) -> EventType;

    /// Returns the metadata of the event.
    fn metadata(&self) -> &EventMetadata;

    /// Converts the event to its wire envelope.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the payload cannot be
    /// serialized.
    fn to_envelope(&self) -> Result<EventEnvelope, DomainError>;

    /// Reconstructs the event from a wire envelope.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EventProcessing` for unknown kinds and for
    /// `CREATE` envelopes whose payload is missing or undecodable.
    fn from_envelope(envelope: EventEnvelope) -> Result<Self, DomainError>;

    /// Partition key of the event.
    fn key(&self) -> i32 {
        self.metadata().key
    }

    /// Same kind, key and payload, regardless of when either was created.
    fn is_same_event(&self, other: &Self) -> bool {
        match (self.to_envelope(), other.to_envelope()) {
            (Ok(a), Ok(b)) => a.is_same_event(&b),
            _ => false,
        }
    }
}

/// Checks a serialized event against an expected typed event, ignoring the
/// creation timestamp. Returns `false` if `json` is not an envelope.
pub fn is_same_event_json<E: DomainEvent>(json: &str, expected: &E) -> bool {
    let Ok(actual) = serde_json::from_str::<EventEnvelope>(json) else {
        return false;
    };
    expected
        .to_envelope()
        .is_ok_and(|expected| actual.is_same_event(&expected))
}
