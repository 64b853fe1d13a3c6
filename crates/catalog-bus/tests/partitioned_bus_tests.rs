//! Integration tests for `PartitionedBus`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use catalog_bus::{BusConfig, PartitionedBus};
use catalog_core::bus::{BusError, Message, MessageBus, MessageHandler};
use catalog_core::error::DomainError;
use tokio::sync::{Mutex, Semaphore};

fn fast_config() -> BusConfig {
    BusConfig {
        partitions: 3,
        capacity: 64,
        accept_timeout: Duration::from_millis(200),
        max_attempts: 3,
        retry_backoff: Duration::from_millis(1),
    }
}

/// Records `(partition_key, body)` for every delivered message.
#[derive(Default)]
struct RecordingHandler {
    delivered: Mutex<Vec<(String, Vec<u8>)>>,
}

#[async_trait]
impl MessageHandler for RecordingHandler {
    async fn handle(&self, message: &Message) -> Result<(), DomainError> {
        self.delivered
            .lock()
            .await
            .push((message.partition_key.clone(), message.body.clone()));
        Ok(())
    }
}

/// Fails the first `failures` deliveries with the given error.
struct FlakyHandler {
    failures: u32,
    error: DomainError,
    calls: AtomicU32,
}

#[async_trait]
impl MessageHandler for FlakyHandler {
    async fn handle(&self, _message: &Message) -> Result<(), DomainError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(self.error.clone())
        } else {
            Ok(())
        }
    }
}

/// Blocks every delivery until a permit is released.
struct GatedHandler {
    gate: Arc<Semaphore>,
}

#[async_trait]
impl MessageHandler for GatedHandler {
    async fn handle(&self, _message: &Message) -> Result<(), DomainError> {
        let _permit = self.gate.acquire().await;
        Ok(())
    }
}

#[tokio::test]
async fn test_messages_with_same_key_are_delivered_in_send_order() {
    let bus = PartitionedBus::new(fast_config());
    let handler = Arc::new(RecordingHandler::default());
    bus.subscribe("products", handler.clone()).await.unwrap();

    for seq in 0u8..50 {
        let key = (seq % 5).to_string();
        bus.send("products", Message::new(key, vec![seq])).await.unwrap();
    }
    bus.shutdown().await;

    let delivered = handler.delivered.lock().await.clone();
    assert_eq!(delivered.len(), 50);
    for key in 0u8..5 {
        let key = key.to_string();
        let sequence: Vec<u8> = delivered
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, body)| body[0])
            .collect();
        assert_eq!(sequence.len(), 10);
        assert!(sequence.windows(2).all(|w| w[0] < w[1]), "out of order for key {key}: {sequence:?}");
    }
}

#[tokio::test]
async fn test_concurrent_publishers_each_deliver_every_message_once_in_order() {
    // Arrange
    let bus = Arc::new(PartitionedBus::new(fast_config()));
    let handler = Arc::new(RecordingHandler::default());
    bus.subscribe("products", handler.clone()).await.unwrap();

    // Act
    let publishers: Vec<_> = (0u8..8)
        .map(|task| {
            let bus = bus.clone();
            tokio::spawn(async move {
                for seq in 0u8..30 {
                    let key = format!("{task}-{}", seq % 3);
                    bus.send("products", Message::new(key, vec![task, seq]))
                        .await
                        .unwrap();
                }
            })
        })
        .collect();
    for publisher in publishers {
        publisher.await.unwrap();
    }
    bus.shutdown().await;

    // Assert
    let delivered = handler.delivered.lock().await.clone();
    assert_eq!(delivered.len(), 8 * 30);
    let mut bodies: Vec<Vec<u8>> = delivered.iter().map(|(_, body)| body.clone()).collect();
    bodies.sort();
    bodies.dedup();
    assert_eq!(bodies.len(), 8 * 30, "a message was delivered more than once");

    for task in 0u8..8 {
        for lane in 0u8..3 {
            let key = format!("{task}-{lane}");
            let sequence: Vec<u8> = delivered
                .iter()
                .filter(|(k, _)| *k == key)
                .map(|(_, body)| body[1])
                .collect();
            assert_eq!(sequence.len(), 10);
            assert!(
                sequence.windows(2).all(|w| w[0] < w[1]),
                "out of order for key {key}: {sequence:?}"
            );
        }
    }
}

#[tokio::test]
async fn test_send_to_undeclared_channel_fails() {
    let bus = PartitionedBus::new(fast_config());

    let result = bus.send("reviews", Message::new("1", vec![])).await;

    assert_eq!(result, Err(BusError::UnknownChannel("reviews".into())));
}

#[tokio::test]
async fn test_send_after_shutdown_fails_with_closed() {
    let bus = PartitionedBus::new(fast_config());
    bus.subscribe("products", Arc::new(RecordingHandler::default()))
        .await
        .unwrap();
    bus.shutdown().await;

    let result = bus.send("products", Message::new("1", vec![])).await;

    assert_eq!(result, Err(BusError::Closed));
}

#[tokio::test]
async fn test_subscribing_twice_is_rejected() {
    let bus = PartitionedBus::new(fast_config());
    bus.subscribe("products", Arc::new(RecordingHandler::default()))
        .await
        .unwrap();

    let result = bus
        .subscribe("products", Arc::new(RecordingHandler::default()))
        .await;

    assert_eq!(result, Err(BusError::AlreadySubscribed("products".into())));
    bus.shutdown().await;
}

#[tokio::test]
async fn test_transient_failure_is_retried_until_success() {
    let bus = PartitionedBus::new(fast_config());
    let handler = Arc::new(FlakyHandler {
        failures: 2,
        error: DomainError::Infrastructure("db down".into()),
        calls: AtomicU32::new(0),
    });
    bus.subscribe("products", handler.clone()).await.unwrap();

    bus.send("products", Message::new("1", vec![])).await.unwrap();
    bus.shutdown().await;

    assert_eq!(handler.calls.load(Ordering::SeqCst), 3);
    assert!(bus.dead_letters().await.is_empty());
}

#[tokio::test]
async fn test_transient_failure_is_dead_lettered_after_max_attempts() {
    let bus = PartitionedBus::new(fast_config());
    let handler = Arc::new(FlakyHandler {
        failures: u32::MAX,
        error: DomainError::Infrastructure("db down".into()),
        calls: AtomicU32::new(0),
    });
    bus.subscribe("products", handler.clone()).await.unwrap();

    let message = Message::new("1", b"payload".to_vec());
    let message_id = message.id;
    bus.send("products", message).await.unwrap();
    bus.shutdown().await;

    let dead = bus.dead_letters().await;
    assert_eq!(dead.len(), 1);
    assert_eq!(dead[0].channel, "products");
    assert_eq!(dead[0].message.id, message_id);
    assert_eq!(dead[0].attempts, 3);
    assert_eq!(handler.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_permanent_failure_is_dead_lettered_without_retry() {
    let bus = PartitionedBus::new(fast_config());
    let handler = Arc::new(FlakyHandler {
        failures: u32::MAX,
        error: DomainError::EventProcessing("Incorrect event type: UPDATE".into()),
        calls: AtomicU32::new(0),
    });
    bus.subscribe("products", handler.clone()).await.unwrap();

    bus.send("products", Message::new("1", vec![])).await.unwrap();
    bus.shutdown().await;

    let dead = bus.dead_letters().await;
    assert_eq!(dead.len(), 1);
    assert_eq!(dead[0].attempts, 1);
    assert!(matches!(dead[0].error, DomainError::EventProcessing(_)));
    assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_send_fails_with_full_when_partition_is_saturated() {
    let bus = PartitionedBus::new(BusConfig {
        partitions: 1,
        capacity: 1,
        accept_timeout: Duration::from_millis(50),
        ..fast_config()
    });
    let gate = Arc::new(Semaphore::new(0));
    bus.subscribe("products", Arc::new(GatedHandler { gate: gate.clone() }))
        .await
        .unwrap();

    // The worker takes the first message and blocks on it.
    bus.send("products", Message::new("1", vec![1])).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    // The second message fills the single buffer slot.
    bus.send("products", Message::new("1", vec![2])).await.unwrap();

    let result = bus.send("products", Message::new("1", vec![3])).await;
    assert_eq!(result, Err(BusError::Full("products".into())));

    gate.add_permits(10);
    bus.shutdown().await;
}
