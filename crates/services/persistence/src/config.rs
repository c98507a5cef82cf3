//! Store configuration.

use std::env;
use std::time::Duration;

use domain::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_DATABASE_NAME, DEFAULT_OPERATION_TIMEOUT_SECS};

/// Default connection URI for a local store
pub const DEFAULT_STORE_URI: &str = "mongodb://localhost:27017";

/// Document store configuration.
#[derive(Clone)]
pub struct StoreConfig {
    /// Connection URI (may embed credentials)
    pub uri: String,
    /// Database holding the jobs and users collections
    pub database: String,
    /// Deadline for connecting and probing at startup
    pub connect_timeout: Duration,
    /// Deadline for each individual operation
    pub operation_timeout: Duration,
    /// Create the natural-key unique indexes on startup
    pub ensure_indexes: bool,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("uri", &"[REDACTED]")
            .field("database", &self.database)
            .field("connect_timeout", &self.connect_timeout)
            .field("operation_timeout", &self.operation_timeout)
            .field("ensure_indexes", &self.ensure_indexes)
            .finish()
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            uri: env::var("MONGODB_URI").unwrap_or_else(|_| DEFAULT_STORE_URI.to_string()),
            database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string()),
            connect_timeout: Duration::from_secs(
                env::var("STORE_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            operation_timeout: Duration::from_secs(
                env::var("STORE_OPERATION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_OPERATION_TIMEOUT_SECS),
            ),
            ensure_indexes: env::var("STORE_ENSURE_INDEXES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_STORE_URI.to_string(),
            database: DEFAULT_DATABASE_NAME.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            operation_timeout: Duration::from_secs(DEFAULT_OPERATION_TIMEOUT_SECS),
            ensure_indexes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_deadlines() {
        let config = StoreConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.operation_timeout, Duration::from_secs(5));
        assert_eq!(config.database, "linkedin_scraper");
    }

    #[test]
    fn test_debug_redacts_uri() {
        let config = StoreConfig {
            uri: "mongodb://admin:secret@db:27017".to_string(),
            ..StoreConfig::default()
        };
        let debug = format!("{:?}", config);

        assert!(!debug.contains("secret"));
        assert!(debug.contains("linkedin_scraper"));
    }
}
