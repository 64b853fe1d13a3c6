//! Domain model for the recommendation service.

pub mod commands;
pub mod events;
pub mod model;
pub mod repository;
