//! Catalog — composite layer.
//!
//! Builds the product aggregate from the three owning services and turns
//! composite writes into events. The composite layer owns no entity data.

pub mod aggregator;
pub mod dispatcher;
pub mod error_translator;
pub mod health;
pub mod integration;
pub mod model;
pub mod writes;
