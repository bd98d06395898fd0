use core_config::{ConfigError, FromEnv, env_first_of, env_or_default, env_parse_or, env_required};

const DEFAULT_URL: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "store";

/// MongoDB connection settings
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "store")
///     .with_app_name("catalog");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoConfig {
    /// Connection string, `mongodb://[user:pass@]host[:port][/db][?options]`
    pub url: String,
    pub database: String,
    /// Reported to the server, shows up in its logs
    pub app_name: Option<String>,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Environment variables:
/// - `MONGODB_URL` or `MONGO_URL` (required)
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` (default: `store`)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default: 100)
/// - `MONGODB_MIN_POOL_SIZE` (default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 30)
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let url = match env_first_of(&["MONGODB_URL", "MONGO_URL"]) {
            Some(url) => url,
            None => env_required("MONGODB_URL")?,
        };
        let database = env_or_default(
            "MONGODB_DATABASE",
            &env_or_default("MONGO_DATABASE", &defaults.database),
        );

        Ok(Self {
            url,
            database,
            app_name: env_first_of(&["MONGODB_APP_NAME"]),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 9] = [
        "MONGODB_URL",
        "MONGO_URL",
        "MONGODB_DATABASE",
        "MONGO_DATABASE",
        "MONGODB_APP_NAME",
        "MONGODB_MAX_POOL_SIZE",
        "MONGODB_MIN_POOL_SIZE",
        "MONGODB_CONNECT_TIMEOUT_SECS",
        "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
    ];

    fn with_env<F: FnOnce()>(set: &[(&str, &str)], f: F) {
        let vars: Vec<(&str, Option<&str>)> = ALL_VARS
            .iter()
            .map(|key| {
                let value = set.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
                (*key, value)
            })
            .collect();
        temp_env::with_vars(vars, f);
    }

    #[test]
    fn test_from_env_minimal() {
        with_env(&[("MONGODB_URL", "mongodb://db:27017")], || {
            let config = MongoConfig::from_env().unwrap();
            assert_eq!(config.url(), "mongodb://db:27017");
            assert_eq!(config.database(), "store");
            assert_eq!(config.app_name, None);
            assert_eq!(config.max_pool_size, 100);
            assert_eq!(config.min_pool_size, 5);
        });
    }

    #[test]
    fn test_from_env_legacy_names() {
        with_env(
            &[("MONGO_URL", "mongodb://legacy:27017"), ("MONGO_DATABASE", "shop")],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url(), "mongodb://legacy:27017");
                assert_eq!(config.database(), "shop");
            },
        );
    }

    #[test]
    fn test_from_env_full() {
        with_env(
            &[
                ("MONGODB_URL", "mongodb://db:27017"),
                ("MONGODB_DATABASE", "catalog"),
                ("MONGODB_APP_NAME", "catalog-tests"),
                ("MONGODB_MAX_POOL_SIZE", "20"),
                ("MONGODB_MIN_POOL_SIZE", "2"),
                ("MONGODB_CONNECT_TIMEOUT_SECS", "3"),
                ("MONGODB_SERVER_SELECTION_TIMEOUT_SECS", "4"),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.database(), "catalog");
                assert_eq!(config.app_name.as_deref(), Some("catalog-tests"));
                assert_eq!(config.max_pool_size, 20);
                assert_eq!(config.min_pool_size, 2);
                assert_eq!(config.connect_timeout_secs, 3);
                assert_eq!(config.server_selection_timeout_secs, 4);
            },
        );
    }

    #[test]
    fn test_from_env_missing_url() {
        with_env(&[], || {
            let err = MongoConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "MONGODB_URL"));
        });
    }

    #[test]
    fn test_from_env_prefers_current_names() {
        with_env(
            &[
                ("MONGODB_URL", "mongodb://current:27017"),
                ("MONGO_URL", "mongodb://legacy:27017"),
                ("MONGODB_DATABASE", "catalog"),
                ("MONGO_DATABASE", "shop"),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url(), "mongodb://current:27017");
                assert_eq!(config.database(), "catalog");
            },
        );
    }

    #[test]
    fn test_from_env_bad_pool_size() {
        with_env(
            &[("MONGODB_URL", "mongodb://db:27017"), ("MONGODB_MAX_POOL_SIZE", "lots")],
            || {
                let err = MongoConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("MONGODB_MAX_POOL_SIZE"));
            },
        );
    }

    #[test]
    fn test_builders() {
        let config = MongoConfig::with_database("mongodb://prod:27017", "store_prod")
            .with_app_name("catalog");
        assert_eq!(config.url(), "mongodb://prod:27017");
        assert_eq!(config.database(), "store_prod");
        assert_eq!(config.app_name.as_deref(), Some("catalog"));

        let config = MongoConfig::new("mongodb://other:27017");
        assert_eq!(config.database(), "store");
    }
}
