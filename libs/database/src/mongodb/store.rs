use core_config::FromEnv;
use mongodb::{Client, Collection, Database};
use tracing::info;

use super::{
    HealthStatus, MongoConfig, check_health, check_health_detailed, connect_from_config_with_retry,
};
use crate::common::DatabaseResult;

/// Long-lived handle to one MongoDB database
///
/// Create it once at startup and share it; clones reuse the driver's
/// connection pool.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    client: Client,
    database: Database,
}

impl DocumentStore {
    /// Wrap an already connected client
    pub fn new(client: Client, database: &str) -> Self {
        let database = client.database(database);
        Self { client, database }
    }

    /// Connect (retrying with the default policy) and select `config.database`
    pub async fn connect(config: &MongoConfig) -> DatabaseResult<Self> {
        let client = connect_from_config_with_retry(config, None).await?;
        let store = Self::new(client, config.database());

        let status = store.health().await;
        info!(
            database = %config.database,
            response_time_ms = status.response_time_ms,
            "Document store ready"
        );
        Ok(store)
    }

    /// [`DocumentStore::connect`] with [`MongoConfig::from_env`]
    pub async fn connect_from_env() -> DatabaseResult<Self> {
        let config = MongoConfig::from_env()?;
        Self::connect(&config).await
    }

    /// Typed handle to the named collection
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection::<T>(name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub async fn is_healthy(&self) -> bool {
        check_health(&self.client).await
    }

    /// Timed `ping`, with the driver's reason when it fails
    pub async fn health(&self) -> HealthStatus {
        check_health_detailed(&self.client).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DatabaseError;

    #[tokio::test]
    async fn test_connect_from_env_requires_url() {
        let result = temp_env::async_with_vars(
            [("MONGODB_URL", None::<&str>), ("MONGO_URL", None::<&str>)],
            DocumentStore::connect_from_env(),
        )
        .await;

        assert!(matches!(result, Err(DatabaseError::Config(_))));
    }

    #[tokio::test]
    async fn test_collection_handle_uses_selected_database() {
        // Client construction is lazy, no server is contacted here.
        let client = Client::with_uri_str("mongodb://127.0.0.1:27017").await.unwrap();
        let store = DocumentStore::new(client, "store_test");

        let collection = store.collection::<mongodb::bson::Document>("products");
        assert_eq!(collection.name(), "products");
        assert_eq!(collection.namespace().db, "store_test");
        assert_eq!(store.database().name(), "store_test");
    }

    #[tokio::test]
    async fn test_health_reports_unreachable_server() {
        let mut options = mongodb::options::ClientOptions::parse("mongodb://127.0.0.1:1")
            .await
            .unwrap();
        options.server_selection_timeout = Some(std::time::Duration::from_millis(200));
        let store = DocumentStore::new(Client::with_options(options).unwrap(), "store_test");

        let status = store.health().await;
        assert!(!status.healthy);
        assert!(status.message.is_some());
        assert!(!store.is_healthy().await);
    }
}
