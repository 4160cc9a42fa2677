use async_trait::async_trait;
use sqlx::MySqlPool;

use super::super::models::Tariff;
use crate::core::{Entity, MemoryStore, Repository, Result};

/// Tariff catalogue cache, keyed by tariff name
#[async_trait]
pub trait TariffRepository: Repository<Tariff> {
    /// Tariff by its generated row id
    async fn find_by_row_id(&self, id: u64) -> Result<Option<Tariff>>;
}

const TARIFF_COLUMNS: &str = r#"
    id, tariff_name, tariff_description, weight_min, weight_max,
    length_max, width_max, height_max
"#;

pub struct MySqlTariffRepository {
    pool: MySqlPool,
}

impl MySqlTariffRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Tariff> for MySqlTariffRepository {
    async fn create(&self, tariff: Tariff) -> Result<Tariff> {
        let result = sqlx::query(
            r#"
            INSERT INTO tariffs (
                tariff_name, tariff_description, weight_min, weight_max,
                length_max, width_max, height_max
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&tariff.tariff_name)
        .bind(&tariff.tariff_description)
        .bind(tariff.weight_min)
        .bind(tariff.weight_max)
        .bind(tariff.length_max)
        .bind(tariff.width_max)
        .bind(tariff.height_max)
        .execute(&self.pool)
        .await?;

        Ok(tariff.with_generated(result.last_insert_id()))
    }

    async fn find_by_id(&self, tariff_name: &String) -> Result<Option<Tariff>> {
        let tariff = sqlx::query_as::<_, Tariff>(&format!(
            "SELECT {} FROM tariffs WHERE tariff_name = ?",
            TARIFF_COLUMNS
        ))
        .bind(tariff_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tariff)
    }

    async fn all(&self) -> Result<Vec<Tariff>> {
        let tariffs = sqlx::query_as::<_, Tariff>(&format!(
            "SELECT {} FROM tariffs ORDER BY id",
            TARIFF_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(tariffs)
    }
}

#[async_trait]
impl TariffRepository for MySqlTariffRepository {
    async fn find_by_row_id(&self, id: u64) -> Result<Option<Tariff>> {
        let tariff = sqlx::query_as::<_, Tariff>(&format!(
            "SELECT {} FROM tariffs WHERE id = ?",
            TARIFF_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tariff)
    }
}

#[async_trait]
impl TariffRepository for MemoryStore<Tariff> {
    async fn find_by_row_id(&self, id: u64) -> Result<Option<Tariff>> {
        Ok(self
            .filter(|tariff| tariff.id == Some(id))
            .await
            .into_iter()
            .next())
    }
}
