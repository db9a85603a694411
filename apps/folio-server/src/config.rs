//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use folio_infra::DatabaseConfig;

/// Template directory shipped with the server.
pub const DEFAULT_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub service_name: String,
    /// Emit JSON log lines instead of pretty output.
    pub json_logs: bool,
    pub database: Option<DatabaseConfig>,
    /// Apply pending migrations when the database connects.
    pub run_migrations: bool,
    pub template_dir: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .map(|url| {
                let mut config = DatabaseConfig::new(url);
                if let Some(max) = parse(&lookup, "DB_MAX_CONNECTIONS") {
                    config.max_connections = max;
                }
                if let Some(min) = parse(&lookup, "DB_MIN_CONNECTIONS") {
                    config.min_connections = min;
                }
                config
            });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse(&lookup, "PORT").unwrap_or(8080),
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| "folio".to_string()),
            json_logs: lookup("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
            database,
            run_migrations: lookup("RUN_MIGRATIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            template_dir: lookup("TEMPLATE_DIR")
                .unwrap_or_else(|| DEFAULT_TEMPLATE_DIR.to_string()),
        }
    }
}

/// Parse a variable, treating malformed values as unset.
fn parse<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.service_name, "folio");
        assert!(!config.json_logs);
        assert!(config.database.is_none());
        assert!(!config.run_migrations);
        assert_eq!(config.template_dir, DEFAULT_TEMPLATE_DIR);
    }

    #[test]
    fn test_database_pool_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/folio"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("DB_MIN_CONNECTIONS", "not-a-number"),
            ("RUN_MIGRATIONS", "1"),
        ]);

        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/folio");
        assert_eq!(database.max_connections, 20);
        assert_eq!(database.min_connections, 10);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_empty_database_url_means_no_database() {
        let config = config_from(&[("DATABASE_URL", ""), ("PORT", "3000"), ("LOG_FORMAT", "JSON")]);

        assert!(config.database.is_none());
        assert!(config.json_logs);
        assert_eq!(config.port, 3000);
    }
}
