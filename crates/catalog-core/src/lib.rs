//! Catalog Core — shared domain abstractions.
//!
//! This crate defines the error taxonomy, the event envelope and the ports
//! (message bus, storage outcomes) that the owning services and the composite
//! layer depend on. It contains no infrastructure code.

pub mod bus;
pub mod clock;
pub mod error;
pub mod event;
pub mod http_error;
pub mod service_address;
pub mod store;
