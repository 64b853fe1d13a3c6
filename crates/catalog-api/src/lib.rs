//! Catalog — HTTP surfaces and composition root.
//!
//! One binary hosts the composite service and the three owning services,
//! each on its own port, wired together by [`bootstrap::build`].

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
