//! Transport tuning.

use std::time::Duration;

/// Configuration for [`crate::PartitionedBus`].
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// Partitions (and worker tasks) per channel.
    pub partitions: usize,
    /// Buffered messages per partition.
    pub capacity: usize,
    /// How long `send` may wait for buffer space.
    pub accept_timeout: Duration,
    /// Delivery attempts for transient failures, including the first.
    pub max_attempts: u32,
    /// Base delay between attempts; attempt `n` waits `n * retry_backoff`.
    pub retry_backoff: Duration,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            partitions: 4,
            capacity: 256,
            accept_timeout: Duration::from_millis(500),
            max_attempts: 3,
            retry_backoff: Duration::from_millis(100),
        }
    }
}
