use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Default filter when `RUST_LOG` is unset.
fn default_directives(environment: Environment) -> &'static str {
    match environment {
        Environment::Production => "warn,domain_products=info,database=info",
        Environment::Development => "info,domain_products=debug,database=debug,mongodb=warn",
    }
}

/// Build the filter: `RUST_LOG` when set, the environment default otherwise.
pub fn env_filter(environment: Environment) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)))
}

/// Initialize tracing for the given environment.
///
/// - **Production**: flattened JSON events, no module targets.
/// - **Development**: pretty, human-readable output.
///
/// Both install [`tracing_error::ErrorLayer`] so span traces can be captured
/// alongside errors.
///
/// Safe to call more than once; later calls are no-ops (tests rely on this).
pub fn init_tracing(environment: &Environment) {
    let filter = env_filter(*environment);

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(()) => info!(%environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_are_valid() {
        for environment in [Environment::Development, Environment::Production] {
            temp_env::with_var_unset("RUST_LOG", || {
                let filter = env_filter(environment);
                assert!(filter.to_string().contains("domain_products"));
            });
        }
    }

    #[test]
    fn test_rust_log_overrides_default() {
        temp_env::with_var("RUST_LOG", Some("trace"), || {
            let filter = env_filter(Environment::Production);
            assert_eq!(filter.to_string(), "trace");
        });
    }

    #[test]
    fn test_init_tracing_multiple_calls() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
    }
}
