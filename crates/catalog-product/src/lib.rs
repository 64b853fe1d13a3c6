//! Catalog — product owning service.
//!
//! Owns the product entity: its storage port, the handlers behind the
//! product HTTP surface, and the consumer that applies product events
//! published by the composite layer.

pub mod application;
pub mod domain;
pub mod infrastructure;
