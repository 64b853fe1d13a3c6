//! Domain model for the product service.

pub mod commands;
pub mod events;
pub mod model;
pub mod repository;
