use async_trait::async_trait;
use sqlx::MySqlPool;

use super::super::models::ListingMarker;
use crate::core::{MemoryStore, Repository, Result};

/// Completeness markers for cached listings
#[async_trait]
pub trait ListingMarkerRepository: Repository<ListingMarker> {
    /// True once the listing for `scope` has been stored in full
    async fn is_complete(&self, scope: &str) -> Result<bool> {
        self.exists(&scope.to_string()).await
    }
}

pub struct MySqlListingMarkerRepository {
    pool: MySqlPool,
}

impl MySqlListingMarkerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<ListingMarker> for MySqlListingMarkerRepository {
    async fn create(&self, marker: ListingMarker) -> Result<ListingMarker> {
        sqlx::query("INSERT INTO listing_markers (scope, created_at) VALUES (?, ?)")
            .bind(&marker.scope)
            .bind(marker.created_at)
            .execute(&self.pool)
            .await?;

        Ok(marker)
    }

    async fn find_by_id(&self, scope: &String) -> Result<Option<ListingMarker>> {
        let marker = sqlx::query_as::<_, ListingMarker>(
            "SELECT scope, created_at FROM listing_markers WHERE scope = ?",
        )
        .bind(scope)
        .fetch_optional(&self.pool)
        .await?;

        Ok(marker)
    }

    async fn exists(&self, scope: &String) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM listing_markers WHERE scope = ?")
            .bind(scope)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn all(&self) -> Result<Vec<ListingMarker>> {
        let markers = sqlx::query_as::<_, ListingMarker>(
            "SELECT scope, created_at FROM listing_markers ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(markers)
    }
}

impl ListingMarkerRepository for MySqlListingMarkerRepository {}

impl ListingMarkerRepository for MemoryStore<ListingMarker> {}
