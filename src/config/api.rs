use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Upstream API connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            request_timeout_secs: 30,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(ApiConfig {
            base_url: env::var("API_BASE_URL")
                .map_err(|_| AppError::Configuration("API_BASE_URL not set".to_string()))?,
            client_id: env::var("API_CLIENT_ID")
                .map_err(|_| AppError::Configuration("API_CLIENT_ID not set".to_string()))?,
            client_secret: env::var("API_CLIENT_SECRET")
                .map_err(|_| AppError::Configuration("API_CLIENT_SECRET not set".to_string()))?,
            request_timeout_secs: env::var("API_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid API_REQUEST_TIMEOUT_SECS".to_string())
                })?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
