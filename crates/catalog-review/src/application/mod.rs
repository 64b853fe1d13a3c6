//! Application layer for the review service.

pub mod command_handlers;
pub mod event_consumer;
pub mod query_handlers;
