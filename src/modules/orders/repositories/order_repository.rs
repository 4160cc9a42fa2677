use async_trait::async_trait;
use sqlx::MySqlPool;

use super::super::models::Order;
use crate::core::{MemoryStore, Repository, Result};

/// Orders registered by earlier runs
#[async_trait]
pub trait OrderRepository: Repository<Order> {
    /// Oldest stored order
    async fn first(&self) -> Result<Option<Order>>;
}

pub struct MySqlOrderRepository {
    pool: MySqlPool,
}

impl MySqlOrderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Order> for MySqlOrderRepository {
    async fn create(&self, order: Order) -> Result<Order> {
        sqlx::query(
            r#"
            INSERT INTO orders (uuid, created_at, state)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&order.uuid)
        .bind(order.created_at)
        .bind(order.state)
        .execute(&self.pool)
        .await?;

        Ok(order)
    }

    async fn find_by_id(&self, uuid: &String) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT uuid, created_at, state
            FROM orders
            WHERE uuid = ?
            "#,
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn all(&self) -> Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT uuid, created_at, state
            FROM orders
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }
}

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn first(&self) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT uuid, created_at, state
            FROM orders
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore<Order> {
    async fn first(&self) -> Result<Option<Order>> {
        Ok(self.all().await?.into_iter().next())
    }
}
