use std::sync::Arc;

use chrono::Utc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use super::super::models::{AuthToken, TokenPayload};
use super::super::repositories::TokenRepository;
use crate::config::ApiConfig;
use crate::core::{AppError, Repository, Result};
use crate::modules::upstream::ApiClient;

/// Owns the bearer token lifecycle
///
/// The store is consulted once per manager; after that the token and the
/// derived header are memoized for the life of the instance.
pub struct TokenManager {
    client: ApiClient,
    client_id: String,
    client_secret: String,
    tokens: Arc<dyn TokenRepository>,
    token: OnceCell<AuthToken>,
    auth_header: OnceCell<String>,
}

impl TokenManager {
    pub fn new(client: ApiClient, config: &ApiConfig, tokens: Arc<dyn TokenRepository>) -> Self {
        Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            tokens,
            token: OnceCell::new(),
            auth_header: OnceCell::new(),
        }
    }

    /// Resolve a usable token: the newest stored one if it has not expired,
    /// otherwise a freshly fetched one that is persisted before returning.
    pub async fn get_token(&self) -> Result<AuthToken> {
        if let Some(token) = self.tokens.latest().await? {
            if !token.is_expired_at(Utc::now()) {
                debug!(jti = %token.jti, expired_at = %token.expired_at, "Reusing cached token");
                return Ok(token);
            }
            debug!(jti = %token.jti, expired_at = %token.expired_at, "Cached token expired");
        }

        let payload = self.fetch_token().await?;
        let token = AuthToken::from_payload(payload, Utc::now())?;
        let token = self.tokens.create(token).await?;

        info!(jti = %token.jti, expired_at = %token.expired_at, "Fetched new token");
        Ok(token)
    }

    /// Memoized token
    pub async fn token(&self) -> Result<&AuthToken> {
        self.token.get_or_try_init(|| self.get_token()).await
    }

    /// Memoized `Authorization` header value
    pub async fn auth_header(&self) -> Result<String> {
        let header = self
            .auth_header
            .get_or_try_init(|| async { Ok::<_, AppError>(self.token().await?.bearer()) })
            .await?;

        Ok(header.clone())
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn fetch_token(&self) -> Result<TokenPayload> {
        let url = self.client.endpoints().token();
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        self.client
            .post_query::<_, TokenPayload>(&url, &params)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch token");
                AppError::auth_unavailable(format!("Failed to fetch token: {}", e))
            })
    }
}
