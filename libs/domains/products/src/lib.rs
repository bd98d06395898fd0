//! Products Domain
//!
//! Product catalog CRUD backed by a MongoDB collection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Usecase   │  ← Business rules, not-found mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Stored document, inbound/outbound schemas
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::mongodb::{DocumentStore, MongoConfig};
//! use domain_products::{ProductIn, ProductUsecase};
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "store");
//! let store = DocumentStore::connect(&config).await?;
//! let usecase = ProductUsecase::mongo(&store);
//!
//! let created = usecase
//!     .create(ProductIn {
//!         name: "Iphone 14 Pro Max".to_string(),
//!         quantity: 10,
//!         price: Decimal::from(6000),
//!     })
//!     .await?;
//! let fetched = usecase.get(created.id).await?;
//! assert_eq!(fetched.name, created.name);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod usecase;

pub use error::{ProductError, ProductResult};
pub use models::{Product, ProductIn, ProductOut, ProductUpdate, ProductUpdateOut};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use usecase::ProductUsecase;
