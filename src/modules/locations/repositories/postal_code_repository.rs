use async_trait::async_trait;
use sqlx::MySqlPool;

use super::super::models::PostalCode;
use crate::core::{MemoryStore, Repository, Result};

/// Postal code cache lookups
#[async_trait]
pub trait PostalCodeRepository: Repository<PostalCode> {
    async fn find_by_city_code(&self, city_code: u32) -> Result<Vec<PostalCode>>;
}

/// MySQL-backed postal code cache
pub struct MySqlPostalCodeRepository {
    pool: MySqlPool,
}

impl MySqlPostalCodeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<PostalCode> for MySqlPostalCodeRepository {
    async fn create(&self, postal_code: PostalCode) -> Result<PostalCode> {
        sqlx::query("INSERT INTO postal_codes (postal_code, city_code) VALUES (?, ?)")
            .bind(&postal_code.postal_code)
            .bind(postal_code.city_code)
            .execute(&self.pool)
            .await?;

        Ok(postal_code)
    }

    async fn find_by_id(&self, postal_code: &String) -> Result<Option<PostalCode>> {
        let row = sqlx::query_as::<_, PostalCode>(
            "SELECT postal_code, city_code FROM postal_codes WHERE postal_code = ?",
        )
        .bind(postal_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn all(&self) -> Result<Vec<PostalCode>> {
        let rows = sqlx::query_as::<_, PostalCode>(
            "SELECT postal_code, city_code FROM postal_codes ORDER BY postal_code",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl PostalCodeRepository for MySqlPostalCodeRepository {
    async fn find_by_city_code(&self, city_code: u32) -> Result<Vec<PostalCode>> {
        let rows = sqlx::query_as::<_, PostalCode>(
            "SELECT postal_code, city_code FROM postal_codes WHERE city_code = ? ORDER BY postal_code",
        )
        .bind(city_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl PostalCodeRepository for MemoryStore<PostalCode> {
    async fn find_by_city_code(&self, city_code: u32) -> Result<Vec<PostalCode>> {
        Ok(self.filter(|row| row.city_code == city_code).await)
    }
}
