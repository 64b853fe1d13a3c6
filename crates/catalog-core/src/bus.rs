//! Message transport port.
//!
//! The composite layer publishes through [`MessageBus`]; owning services
//! consume through [`MessageHandler`]. Transports guarantee per-key ordering
//! within a channel and at-least-once delivery.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::error::DomainError;

/// A message as handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Transport-level identifier, used for tracing and dead-lettering.
    pub id: Uuid,
    /// Ordering key. Messages sharing a key on one channel are delivered in
    /// send order.
    pub partition_key: String,
    /// Serialized event envelope.
    pub body: Vec<u8>,
}

impl Message {
    /// Creates a message with a fresh identifier.
    #[must_use]
    pub fn new(partition_key: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            partition_key: partition_key.into(),
            body,
        }
    }
}

/// Errors raised while handing a message to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    /// No consumer group has declared the channel.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    /// The channel already has a consumer group.
    #[error("channel '{0}' is already subscribed")]
    AlreadySubscribed(String),

    /// The channel did not accept the message in time.
    #[error("channel '{0}' is full")]
    Full(String),

    /// The transport has been shut down.
    #[error("transport closed")]
    Closed,
}

/// Publishing side of the transport. Implementations must be safe to share
/// between concurrent callers.
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Hands `message` to the transport on `channel`.
    ///
    /// Returns once the transport has accepted the message; never waits for
    /// a consumer to process it.
    async fn send(&self, channel: &str, message: Message) -> Result<(), BusError>;
}

/// Consuming side of the transport.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Processes one delivered message.
    async fn handle(&self, message: &Message) -> Result<(), DomainError>;
}
