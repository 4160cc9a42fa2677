use async_trait::async_trait;
use sqlx::MySqlPool;

use super::super::models::DeliveryMode;
use crate::core::{Entity, MemoryStore, Repository, Result};

/// Delivery mode cache, keyed by tariff code
#[async_trait]
pub trait DeliveryModeRepository: Repository<DeliveryMode> {
    /// Modes belonging to one catalogue tariff
    async fn find_by_tariff_id(&self, tariff_id: u64) -> Result<Vec<DeliveryMode>>;
}

pub struct MySqlDeliveryModeRepository {
    pool: MySqlPool,
}

impl MySqlDeliveryModeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<DeliveryMode> for MySqlDeliveryModeRepository {
    async fn create(&self, mode: DeliveryMode) -> Result<DeliveryMode> {
        let result = sqlx::query(
            r#"
            INSERT INTO delivery_modes (tariff_id, delivery_mode, delivery_mode_name, tariff_code)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(mode.tariff_id)
        .bind(mode.delivery_mode)
        .bind(&mode.delivery_mode_name)
        .bind(mode.tariff_code)
        .execute(&self.pool)
        .await?;

        Ok(mode.with_generated(result.last_insert_id()))
    }

    async fn find_by_id(&self, tariff_code: &u32) -> Result<Option<DeliveryMode>> {
        let mode = sqlx::query_as::<_, DeliveryMode>(
            r#"
            SELECT id, tariff_id, delivery_mode, delivery_mode_name, tariff_code
            FROM delivery_modes
            WHERE tariff_code = ?
            "#,
        )
        .bind(tariff_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(mode)
    }

    async fn all(&self) -> Result<Vec<DeliveryMode>> {
        let modes = sqlx::query_as::<_, DeliveryMode>(
            r#"
            SELECT id, tariff_id, delivery_mode, delivery_mode_name, tariff_code
            FROM delivery_modes
            ORDER BY tariff_code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(modes)
    }
}

#[async_trait]
impl DeliveryModeRepository for MySqlDeliveryModeRepository {
    async fn find_by_tariff_id(&self, tariff_id: u64) -> Result<Vec<DeliveryMode>> {
        let modes = sqlx::query_as::<_, DeliveryMode>(
            r#"
            SELECT id, tariff_id, delivery_mode, delivery_mode_name, tariff_code
            FROM delivery_modes
            WHERE tariff_id = ?
            ORDER BY tariff_code
            "#,
        )
        .bind(tariff_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(modes)
    }
}

#[async_trait]
impl DeliveryModeRepository for MemoryStore<DeliveryMode> {
    async fn find_by_tariff_id(&self, tariff_id: u64) -> Result<Vec<DeliveryMode>> {
        Ok(self.filter(|mode| mode.tariff_id == tariff_id).await)
    }
}
