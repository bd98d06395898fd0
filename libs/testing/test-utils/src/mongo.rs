//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that starts a MongoDB container for testing.

use database::mongodb::{DocumentStore, MongoConfig, connect_from_config};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

const MONGO_PORT: u16 = 27017;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped.
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let store = mongo.store();
/// assert!(store.is_healthy().await);
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    store: DocumentStore,
    pub connection_string: String,
}

impl TestMongo {
    /// Start a MongoDB 8 container and connect to database `store_test`
    pub async fn new() -> Self {
        Self::with_database("store_test").await
    }

    pub async fn with_database(db_name: &str) -> Self {
        let container = Mongo::default()
            .with_tag("8")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(MONGO_PORT)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);
        let config = MongoConfig::with_database(connection_string.clone(), db_name)
            .with_app_name("test-utils");

        let client = connect_from_config(&config)
            .await
            .expect("Failed to connect to MongoDB");

        tracing::info!(port = host_port, db_name, "Test MongoDB ready");

        Self {
            container,
            store: DocumentStore::new(client, db_name),
            connection_string,
        }
    }

    /// Cloned store handle (shares the connection pool)
    pub fn store(&self) -> DocumentStore {
        self.store.clone()
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}
