//! Mock `MessageBus` implementations for tests.

use async_trait::async_trait;
use catalog_core::bus::{BusError, Message, MessageBus};
use tokio::sync::Mutex;

/// A transport that accepts every message and records it with its channel.
#[derive(Debug, Default)]
pub struct RecordingBus {
    sent: Mutex<Vec<(String, Message)>>,
}

impl RecordingBus {
    /// Creates an empty recording transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all `(channel, message)` pairs sent so far.
    pub async fn sent(&self) -> Vec<(String, Message)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl MessageBus for RecordingBus {
    async fn send(&self, channel: &str, message: Message) -> Result<(), BusError> {
        self.sent.lock().await.push((channel.to_owned(), message));
        Ok(())
    }
}

/// A transport that rejects every message. Useful for testing dispatch
/// failure paths.
#[derive(Debug)]
pub struct FailingBus(pub BusError);

#[async_trait]
impl MessageBus for FailingBus {
    async fn send(&self, _channel: &str, _message: Message) -> Result<(), BusError> {
        Err(self.0.clone())
    }
}
