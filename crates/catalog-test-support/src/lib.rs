//! Shared test doubles for the catalog services.

mod bus;
mod clock;

pub use bus::{FailingBus, RecordingBus};
pub use clock::FixedClock;
