//! Catalog — recommendation owning service.
//!
//! Owns recommendation entities (keyed by product id and recommendation
//! id) and applies the recommendation events published by the composite
//! layer.

pub mod application;
pub mod domain;
pub mod infrastructure;
