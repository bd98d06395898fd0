//! Product Usecase - Business logic layer

use chrono::Utc;
use database::mongodb::DocumentStore;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductIn, ProductOut, ProductUpdate, ProductUpdateOut};
use crate::mongodb::MongoProductRepository;
use crate::repository::ProductRepository;

/// Product operations between the caller and the document store
///
/// Holds no state besides the repository; build one at startup and clone it
/// wherever it is needed.
pub struct ProductUsecase<R: ProductRepository> {
    repository: Arc<R>,
}

impl ProductUsecase<MongoProductRepository> {
    /// Usecase over the `products` collection of `store`
    pub fn mongo(store: &DocumentStore) -> Self {
        Self::new(MongoProductRepository::new(store))
    }
}

impl<R: ProductRepository> ProductUsecase<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a product
    ///
    /// Fails with [`ProductError::BusinessRule`] when `quantity` is negative.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: ProductIn) -> ProductResult<ProductOut> {
        input.validate().map_err(|e| {
            tracing::warn!(quantity = input.quantity, "Rejected invalid product");
            ProductError::from(e)
        })?;

        let product = self.repository.insert(Product::new(input)).await?;
        Ok(product.into())
    }

    /// Get a product by id
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> ProductResult<ProductOut> {
        self.repository
            .find_by_id(id)
            .await?
            .map(ProductOut::from)
            .ok_or_else(|| ProductError::not_found(id))
    }

    /// Every product, unfiltered and unpaginated
    #[instrument(skip(self))]
    pub async fn query(&self) -> ProductResult<Vec<ProductOut>> {
        let products = self.repository.find_all().await?;
        Ok(products.into_iter().map(ProductOut::from).collect())
    }

    /// Merge the provided fields into an existing product and bump `updated_at`
    ///
    /// Quantity is not re-checked here; only creation enforces it.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: ProductUpdate) -> ProductResult<ProductUpdateOut> {
        let updated_fields = input.changed_fields();

        let product = self
            .repository
            .update(id, input, Utc::now())
            .await?
            .ok_or_else(|| ProductError::not_found(id))?;

        Ok(ProductUpdateOut::new(product, updated_fields))
    }

    /// Delete a product; `Ok(true)` once the document is gone
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ProductError::not_found(id));
        }

        self.repository.delete(id).await
    }
}

impl<R: ProductRepository> Clone for ProductUsecase<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
