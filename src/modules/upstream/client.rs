use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::endpoints::Endpoints;
use crate::config::ApiConfig;
use crate::core::{AppError, Result};

/// HTTP client for the upstream shipping API
///
/// Typed helpers decode bodies into wire structs and turn every failure into an
/// `AppError`: transport problems, non-success statuses and bodies that do not
/// match the expected shape. Nothing is retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoints: Endpoints,
}

/// Raw response used by status-code checks
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// Status below 400
    pub fn is_ok(&self) -> bool {
        !(self.status.is_client_error() || self.status.is_server_error())
    }

    /// Decode the body into a wire struct
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.body.clone())
            .map_err(|e| AppError::malformed(format!("Unexpected response body: {}", e)))
    }
}

impl ApiClient {
    /// Create a new client with the configured per-request timeout
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoints: Endpoints::new(config.base_url.clone()),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GET with query parameters and decode the JSON body
    pub async fn get_json<Q, T>(&self, url: &str, authorization: Option<&str>, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorize(self.client.get(url), authorization).query(query);
        let body = self.send_checked(url, request).await?;
        decode(url, &body)
    }

    /// POST a JSON body and decode the JSON body
    pub async fn post_json<B, T>(&self, url: &str, authorization: Option<&str>, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorize(self.client.post(url), authorization).json(payload);
        let body = self.send_checked(url, request).await?;
        decode(url, &body)
    }

    /// POST with query parameters only (OAuth token endpoint)
    pub async fn post_query<Q, T>(&self, url: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(url).query(query);
        let body = self.send_checked(url, request).await?;
        decode(url, &body)
    }

    /// GET without status checking, for tests asserting on the status itself
    pub async fn get_raw<Q>(&self, url: &str, authorization: Option<&str>, query: &Q) -> Result<ApiResponse>
    where
        Q: Serialize + ?Sized,
    {
        let request = self.authorize(self.client.get(url), authorization).query(query);
        self.send_raw(url, request).await
    }

    /// POST without status checking, for tests asserting on the status itself
    pub async fn post_raw<B>(&self, url: &str, authorization: Option<&str>, payload: &B) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let request = self.authorize(self.client.post(url), authorization).json(payload);
        self.send_raw(url, request).await
    }

    fn authorize(&self, request: RequestBuilder, authorization: Option<&str>) -> RequestBuilder {
        match authorization {
            Some(value) => request.header(reqwest::header::AUTHORIZATION, value),
            None => request,
        }
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<(StatusCode, String)> {
        debug!(endpoint = %url, "Calling upstream API");

        let response = request.send().await.map_err(|e| {
            warn!(endpoint = %url, error = %e, "Upstream request failed");
            AppError::HttpClient(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        debug!(endpoint = %url, status = status.as_u16(), "Upstream responded");
        Ok((status, body))
    }

    async fn send_checked(&self, url: &str, request: RequestBuilder) -> Result<String> {
        let (status, body) = self.send(url, request).await?;

        if !status.is_success() {
            return Err(AppError::Upstream {
                endpoint: url.to_string(),
                status,
                body,
            });
        }

        Ok(body)
    }

    async fn send_raw(&self, url: &str, request: RequestBuilder) -> Result<ApiResponse> {
        let (status, body) = self.send(url, request).await?;

        let body = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).unwrap_or(Value::String(body))
        };

        Ok(ApiResponse { status, body })
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| AppError::malformed(format!("Failed to parse response from {}: {}", url, e)))
}
