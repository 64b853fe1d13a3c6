//! Publishes family events onto the message transport.

use std::sync::Arc;

use catalog_core::bus::{Message, MessageBus};
use catalog_core::error::DomainError;
use catalog_core::event::DomainEvent;
use tracing::{debug, instrument, warn};

/// Publishes events with the event key as partition key.
///
/// A publish returns once the transport has accepted the message. It never
/// waits for a consumer to apply it, and a transport rejection is returned
/// as `DomainError::Dispatch` without retrying.
#[derive(Clone)]
pub struct EventDispatcher {
    bus: Arc<dyn MessageBus>,
}

impl EventDispatcher {
    #[must_use]
    pub fn new(bus: Arc<dyn MessageBus>) -> Self {
        Self { bus }
    }

    /// Publishes `event` on `channel`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Dispatch` if the transport rejects the message,
    /// `DomainError::Infrastructure` if the event cannot be serialized.
    #[instrument(skip(self, event), fields(key = event.key(), event_type = %event.event_type()))]
    pub async fn publish<E: DomainEvent>(&self, channel: &str, event: &E) -> Result<(), DomainError> {
        let body = event.to_envelope()?.to_bytes()?;
        let message = Message::new(event.key().to_string(), body);
        let message_id = message.id;

        self.bus.send(channel, message).await.map_err(|e| {
            warn!(error = %e, "transport rejected event");
            DomainError::Dispatch {
                channel: channel.to_owned(),
                message: e.to_string(),
            }
        })?;

        debug!(%message_id, "event accepted by transport");
        Ok(())
    }
}
