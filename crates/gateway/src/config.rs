//! Gateway configuration.

use std::env;
use std::time::Duration;

use persistence::StoreConfig;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Budget for a single request; passed to store operations as their
    /// caller deadline
    pub request_timeout: Duration,
    /// Store connection settings
    pub store: StoreConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            request_timeout: Duration::from_millis(
                env::var("REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(5000),
            ),
            store: StoreConfig::from_env(),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout: Duration::from_millis(5000),
            store: StoreConfig::default(),
        }
    }
}
