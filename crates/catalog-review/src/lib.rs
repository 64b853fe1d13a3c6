//! Catalog — review owning service.

pub mod application;
pub mod domain;
pub mod infrastructure;
