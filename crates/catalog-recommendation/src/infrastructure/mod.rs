//! Storage adapters for the recommendation service.

pub mod in_memory;
