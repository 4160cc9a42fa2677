use async_trait::async_trait;
use sqlx::MySqlPool;

use super::super::models::AuthToken;
use crate::core::{MemoryStore, Repository, Result};

/// Token cache lookups
#[async_trait]
pub trait TokenRepository: Repository<AuthToken> {
    /// Newest token by expiry, whether expired or not
    async fn latest(&self) -> Result<Option<AuthToken>>;
}

/// MySQL-backed token cache
pub struct MySqlTokenRepository {
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<AuthToken> for MySqlTokenRepository {
    async fn create(&self, token: AuthToken) -> Result<AuthToken> {
        sqlx::query(
            r#"
            INSERT INTO auth_tokens (jti, access_token, token_type, expired_at, scope)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&token.jti)
        .bind(&token.access_token)
        .bind(&token.token_type)
        .bind(token.expired_at)
        .bind(&token.scope)
        .execute(&self.pool)
        .await?;

        Ok(token)
    }

    async fn find_by_id(&self, jti: &String) -> Result<Option<AuthToken>> {
        let token = sqlx::query_as::<_, AuthToken>(
            r#"
            SELECT jti, access_token, token_type, expired_at, scope
            FROM auth_tokens
            WHERE jti = ?
            "#,
        )
        .bind(jti)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }

    async fn exists(&self, jti: &String) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM auth_tokens WHERE jti = ?")
            .bind(jti)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn all(&self) -> Result<Vec<AuthToken>> {
        let tokens = sqlx::query_as::<_, AuthToken>(
            r#"
            SELECT jti, access_token, token_type, expired_at, scope
            FROM auth_tokens
            ORDER BY expired_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tokens)
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn latest(&self) -> Result<Option<AuthToken>> {
        let token = sqlx::query_as::<_, AuthToken>(
            r#"
            SELECT jti, access_token, token_type, expired_at, scope
            FROM auth_tokens
            ORDER BY expired_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }
}

#[async_trait]
impl TokenRepository for MemoryStore<AuthToken> {
    async fn latest(&self) -> Result<Option<AuthToken>> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .max_by_key(|token| token.expired_at))
    }
}
