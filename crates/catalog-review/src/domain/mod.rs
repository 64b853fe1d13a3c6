//! Domain model for the review service.

pub mod commands;
pub mod events;
pub mod model;
pub mod repository;
