//! Storage adapters for the review service.

pub mod in_memory;
