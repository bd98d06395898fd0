use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, ProductUpdate};

/// Document-store operations on the products collection
///
/// Each method is a single round trip. Absence is reported as `None` /
/// `false`; turning it into an error is the usecase's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert one document
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Find one document by id
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Every document in the collection, in store order
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Set the provided fields and `updated_at`, returning the document after the update
    async fn update(
        &self,
        id: Uuid,
        changes: ProductUpdate,
        updated_at: DateTime<Utc>,
    ) -> ProductResult<Option<Product>>;

    /// Delete one document by id; `true` when a document was removed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}
