//! MongoDB connectivity
//!
//! [`DocumentStore`] is what the domain crates hold on to; the free functions
//! are the building blocks it is made of.

mod config;
mod connector;
mod health;
mod store;

pub use config::MongoConfig;
pub use connector::{connect, connect_from_config, connect_from_config_with_retry};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use store::DocumentStore;

pub use mongodb::{Client, Collection, Database};
