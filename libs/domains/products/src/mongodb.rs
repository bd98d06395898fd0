//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::mongodb::DocumentStore;
use futures_util::TryStreamExt;
use mongodb::{
    Collection,
    bson::{Document, doc, to_bson, to_document},
    options::ReturnDocument,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, ProductUpdate};
use crate::repository::ProductRepository;

pub const COLLECTION_NAME: &str = "products";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(store: &DocumentStore) -> Self {
        Self::with_collection(store, COLLECTION_NAME)
    }

    /// Use a differently named collection (tests isolate themselves this way)
    pub fn with_collection(store: &DocumentStore, collection_name: &str) -> Self {
        Self {
            collection: store.collection::<Product>(collection_name),
        }
    }

    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.to_string() }
    }

    /// `$set` body for a partial update
    fn build_update(changes: &ProductUpdate, updated_at: DateTime<Utc>) -> ProductResult<Document> {
        let mut set = to_document(changes)?;
        set.insert("updated_at", to_bson(&updated_at)?);
        Ok(doc! { "$set": set })
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id, product_name = %product.name))]
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        self.collection.insert_one(&product).await?;

        tracing::info!("Product inserted");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        tracing::debug!(found = product.is_some(), "Product lookup");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        tracing::debug!(count = products.len(), "Products listed");
        Ok(products)
    }

    #[instrument(skip(self, changes))]
    async fn update(
        &self,
        id: Uuid,
        changes: ProductUpdate,
        updated_at: DateTime<Utc>,
    ) -> ProductResult<Option<Product>> {
        let update = Self::build_update(&changes, updated_at)?;

        let product = self
            .collection
            .find_one_and_update(Self::id_filter(id), update)
            .return_document(ReturnDocument::After)
            .await?;

        if product.is_some() {
            tracing::info!("Product updated");
        }
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!("Product deleted");
        }
        Ok(deleted)
    }
}
