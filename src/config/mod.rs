use crate::core::{AppError, Result};
use crate::modules::orders::PollPolicy;
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub mod api;
pub mod database;

pub use api::ApiConfig;
pub use database::DatabaseConfig;

/// Main harness configuration, read once at process start
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub polling: PollingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// Bounds for waiting on asynchronous order processing
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    pub interval_secs: u64,
    pub max_attempts: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            api: ApiConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            polling: PollingConfig {
                interval_secs: env::var("ORDER_POLL_INTERVAL_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid ORDER_POLL_INTERVAL_SECS".to_string())
                    })?,
                max_attempts: env::var("ORDER_POLL_MAX_ATTEMPTS")
                    .unwrap_or_else(|_| "24".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid ORDER_POLL_MAX_ATTEMPTS".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::Configuration(
                "API_BASE_URL must not be empty".to_string(),
            ));
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(AppError::Configuration(format!(
                "API_BASE_URL must be an http(s) URL, got {}",
                self.api.base_url
            )));
        }

        if self.api.request_timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.polling.max_attempts == 0 {
            return Err(AppError::Configuration(
                "Order poll attempts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(
            Duration::from_secs(self.polling.interval_secs),
            self.polling.max_attempts,
        )
    }
}
