//! Channel transport backed by tokio mpsc queues.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::bus::{BusError, Message, MessageBus, MessageHandler};
use catalog_core::error::DomainError;
use tokio::sync::mpsc::error::SendTimeoutError;
use tokio::sync::{Mutex, RwLock, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::BusConfig;

/// A message that could not be delivered.
#[derive(Debug, Clone)]
pub struct DeadLetter {
    /// Channel the message was sent on.
    pub channel: String,
    /// The undeliverable message.
    pub message: Message,
    /// Error returned by the last attempt.
    pub error: DomainError,
    /// Number of delivery attempts made.
    pub attempts: u32,
}

#[derive(Default)]
struct Channels {
    partitions: HashMap<String, Vec<mpsc::Sender<Message>>>,
    closed: bool,
}

/// In-process transport with per-key ordering and retry/dead-letter
/// handling.
pub struct PartitionedBus {
    config: BusConfig,
    channels: RwLock<Channels>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    dead_letters: Arc<Mutex<Vec<DeadLetter>>>,
}

impl PartitionedBus {
    /// Creates a transport with no channels declared.
    #[must_use]
    pub fn new(config: BusConfig) -> Self {
        Self {
            config,
            channels: RwLock::new(Channels::default()),
            workers: Mutex::new(Vec::new()),
            dead_letters: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Declares `channel` and starts its partition workers, each delivering
    /// to `handler`.
    ///
    /// # Errors
    ///
    /// Returns `BusError::AlreadySubscribed` if the channel already has a
    /// handler, or `BusError::Closed` after shutdown.
    pub async fn subscribe(
        &self,
        channel: &str,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<(), BusError> {
        let mut channels = self.channels.write().await;
        if channels.closed {
            return Err(BusError::Closed);
        }
        if channels.partitions.contains_key(channel) {
            return Err(BusError::AlreadySubscribed(channel.to_owned()));
        }

        let partition_count = self.config.partitions.max(1);
        let mut senders = Vec::with_capacity(partition_count);
        let mut workers = self.workers.lock().await;
        for partition in 0..partition_count {
            let (tx, rx) = mpsc::channel(self.config.capacity.max(1));
            senders.push(tx);
            workers.push(tokio::spawn(run_partition(
                channel.to_owned(),
                partition,
                rx,
                Arc::clone(&handler),
                self.config.clone(),
                Arc::clone(&self.dead_letters),
            )));
        }
        channels.partitions.insert(channel.to_owned(), senders);

        info!(channel, partitions = partition_count, "channel subscribed");
        Ok(())
    }

    /// Returns a snapshot of every message that exhausted its delivery
    /// attempts or failed permanently.
    pub async fn dead_letters(&self) -> Vec<DeadLetter> {
        self.dead_letters.lock().await.clone()
    }

    /// Stops accepting messages and waits for the workers to drain what is
    /// already queued.
    pub async fn shutdown(&self) {
        {
            let mut channels = self.channels.write().await;
            channels.closed = true;
            channels.partitions.clear();
        }

        let workers = std::mem::take(&mut *self.workers.lock().await);
        for worker in workers {
            if let Err(e) = worker.await {
                error!(error = %e, "partition worker terminated abnormally");
            }
        }
        info!("message transport stopped");
    }
}

#[async_trait]
impl MessageBus for PartitionedBus {
    async fn send(&self, channel: &str, message: Message) -> Result<(), BusError> {
        let sender = {
            let channels = self.channels.read().await;
            if channels.closed {
                return Err(BusError::Closed);
            }
            let partitions = channels
                .partitions
                .get(channel)
                .ok_or_else(|| BusError::UnknownChannel(channel.to_owned()))?;
            partitions[partition_for(&message.partition_key, partitions.len())].clone()
        };

        debug!(channel, message_id = %message.id, partition_key = %message.partition_key, "sending message");

        match sender.send_timeout(message, self.config.accept_timeout).await {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Timeout(_)) => Err(BusError::Full(channel.to_owned())),
            Err(SendTimeoutError::Closed(_)) => Err(BusError::Closed),
        }
    }
}

fn partition_for(partition_key: &str, partitions: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    partition_key.hash(&mut hasher);
    // Modulo keeps the value below `partitions`, so the narrowing is lossless.
    #[allow(clippy::cast_possible_truncation)]
    let index = (hasher.finish() % partitions as u64) as usize;
    index
}

async fn run_partition(
    channel: String,
    partition: usize,
    mut rx: mpsc::Receiver<Message>,
    handler: Arc<dyn MessageHandler>,
    config: BusConfig,
    dead_letters: Arc<Mutex<Vec<DeadLetter>>>,
) {
    while let Some(message) = rx.recv().await {
        let mut attempts = 1;
        loop {
            match handler.handle(&message).await {
                Ok(()) => break,
                Err(err) if err.is_permanent() || attempts >= config.max_attempts => {
                    error!(
                        channel = %channel,
                        partition,
                        message_id = %message.id,
                        partition_key = %message.partition_key,
                        attempts,
                        error = %err,
                        "message dead-lettered"
                    );
                    dead_letters.lock().await.push(DeadLetter {
                        channel: channel.clone(),
                        message,
                        error: err,
                        attempts,
                    });
                    break;
                }
                Err(err) => {
                    warn!(
                        channel = %channel,
                        partition,
                        message_id = %message.id,
                        attempts,
                        error = %err,
                        "message delivery failed, will retry"
                    );
                    tokio::time::sleep(config.retry_backoff * attempts).await;
                    attempts += 1;
                }
            }
        }
    }
    debug!(channel = %channel, partition, "partition worker stopped");
}
