//! Storage adapters for the product service.

pub mod in_memory;
