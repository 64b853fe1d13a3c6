//! Catalog Bus — in-process partitioned message transport.
//!
//! Channels are declared by subscribing a handler. Each channel is split
//! into partitions, each drained by one worker task, so messages sharing a
//! partition key are handled one at a time and in send order.

mod config;
mod partitioned;

pub use config::BusConfig;
pub use partitioned::{DeadLetter, PartitionedBus};
