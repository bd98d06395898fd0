//! Document store connectivity for the product catalog.
//!
//! Wraps the MongoDB driver: configuration, connecting (with startup retry),
//! health checks, and a long-lived `DocumentStore` handle that hands
//! out typed collections.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::mongodb::{DocumentStore, MongoConfig};
//!
//! let config = MongoConfig::from_env()?;
//! let store = DocumentStore::connect(&config).await?;
//! let products = store.collection::<mongodb::bson::Document>("products");
//! ```

pub mod common;
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
