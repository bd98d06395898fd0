use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::{info, instrument};

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Connect with default pool settings
///
/// ```ignore
/// let client = database::mongodb::connect("mongodb://localhost:27017").await?;
/// ```
pub async fn connect(url: &str) -> DatabaseResult<Client> {
    connect_from_config(&MongoConfig::new(url)).await
}

/// Connect using a [`MongoConfig`] and verify the server answers a `ping`
#[instrument(skip(config), fields(database = %config.database))]
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!("Connecting to MongoDB");

    let client = build_client(config).await?;
    verify(&client).await?;

    info!("Connected to MongoDB");
    Ok(client)
}

/// [`connect_from_config`] with exponential backoff, for service startup
///
/// Only the `ping` is retried. A connection string or option that does not
/// parse fails straight away. `None` uses [`RetryConfig::default`].
#[instrument(skip(config, retry_config), fields(database = %config.database))]
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<Client> {
    info!("Connecting to MongoDB");

    let client = build_client(config).await?;
    match retry_config {
        Some(policy) => retry_with_backoff(|| verify(&client), policy).await?,
        None => retry(|| verify(&client)).await?,
    }

    info!("Connected to MongoDB");
    Ok(client)
}

/// Driver client with pool and timeouts applied; does not touch the network
async fn build_client(config: &MongoConfig) -> DatabaseResult<Client> {
    let mut options = ClientOptions::parse(&config.url).await?;
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));
    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(Client::with_options(options)?)
}

async fn verify(client: &Client) -> DatabaseResult<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_connecting() {
        let err = connect("not-a-mongo-url").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Mongo(_)));
    }

    #[tokio::test]
    async fn test_retry_gives_up_on_invalid_url_without_waiting() {
        // Backoff long enough that a single retry would trip the timeout.
        let policy = RetryConfig::new().with_initial_delay(10_000).without_jitter();

        let result = tokio::time::timeout(
            Duration::from_secs(2),
            connect_from_config_with_retry(&MongoConfig::new("not-a-mongo-url"), Some(policy)),
        )
        .await
        .expect("invalid url was retried");

        assert!(matches!(result, Err(DatabaseError::Mongo(_))));
    }

    #[tokio::test]
    async fn test_retry_reports_unreachable_server_as_connection_failure() {
        let config = MongoConfig {
            server_selection_timeout_secs: 1,
            ..MongoConfig::new("mongodb://127.0.0.1:1")
        };
        let policy = RetryConfig::new()
            .with_max_retries(1)
            .with_initial_delay(5)
            .without_jitter();

        let err = connect_from_config_with_retry(&config, Some(policy))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::ConnectionFailed(_)));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_from_config() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let config = MongoConfig::with_database(url, "store_test");
        assert!(connect_from_config(&config).await.is_ok());
    }
}
